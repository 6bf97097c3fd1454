use storelens_client::commands::report::{self, ReportKind};
use storelens_client::commands::rfm;
use storelens_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ReportCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Rfm { path, top, .. } => rfm::run(path, *top),
        Commands::Report { command } => {
            let (kind, path, limit, state) = report_request(command);
            report::run(kind, path, limit, state)
        }
    }
}

fn report_request(command: &ReportCommand) -> (ReportKind, &str, Option<usize>, Option<&str>) {
    match command {
        ReportCommand::Cities { path, limit, .. } => {
            (ReportKind::Cities, path.as_str(), *limit, None)
        }
        ReportCommand::States { path, .. } => (ReportKind::States, path.as_str(), None, None),
        ReportCommand::Payments { path, .. } => (ReportKind::Payments, path.as_str(), None, None),
        ReportCommand::Reviews { path, limit, .. } => {
            (ReportKind::Reviews, path.as_str(), *limit, None)
        }
        ReportCommand::Status { path, .. } => (ReportKind::Status, path.as_str(), None, None),
        ReportCommand::Categories { path, limit, .. } => {
            (ReportKind::Categories, path.as_str(), *limit, None)
        }
        ReportCommand::Monthly { path, .. } => (ReportKind::Monthly, path.as_str(), None, None),
        ReportCommand::ZipCodes { path, state, .. } => {
            (ReportKind::ZipCodes, path.as_str(), None, Some(state.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use storelens_client::commands::report::ReportKind;

    use super::{dispatch, report_request};
    use crate::cli::{Commands, parse_from};

    #[test]
    fn report_subcommands_map_to_report_kinds() {
        let cases: [(&[&str], ReportKind); 3] = [
            (&["storelens", "report", "cities", "o.csv", "--limit", "3"], ReportKind::Cities),
            (&["storelens", "report", "monthly", "o.csv"], ReportKind::Monthly),
            (&["storelens", "report", "zip-codes", "g.csv", "--state", "SP"], ReportKind::ZipCodes),
        ];

        for (args, expected_kind) in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed
                && let Commands::Report { command } = &cli.command
            {
                let (kind, path, _, _) = report_request(command);
                assert_eq!(kind, expected_kind);
                assert!(path.ends_with(".csv"));
            }
        }
    }

    #[test]
    fn zip_codes_forward_the_state_and_limits_forward_the_count() {
        let parsed = parse_from(["storelens", "report", "zip-codes", "g.csv", "--state", "RJ"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed
            && let Commands::Report { command } = &cli.command
        {
            assert_eq!(report_request(command).3, Some("RJ"));
        }

        let parsed = parse_from(["storelens", "report", "reviews", "o.csv", "--limit", "4"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed
            && let Commands::Report { command } = &cli.command
        {
            assert_eq!(report_request(command).2, Some(4));
        }
    }

    #[test]
    fn missing_input_file_surfaces_as_invalid_argument() {
        let parsed = parse_from(["storelens", "rfm", "/nonexistent/storelens/orders.csv"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }
}
