use crate::commands::common::{count_rows, require_positive, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{PaymentMethodRow, ReportData, ReportRows, ReviewScoreRow};
use crate::import::{LoadedSource, load_geolocation, load_order_attributes, load_payments};
use crate::reports::{self, LabelCount, Tally};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReportKind {
    Cities,
    States,
    Payments,
    Reviews,
    Status,
    Categories,
    Monthly,
    ZipCodes,
}

impl ReportKind {
    pub const ALL: [Self; 8] = [
        Self::Cities,
        Self::States,
        Self::Payments,
        Self::Reviews,
        Self::Status,
        Self::Categories,
        Self::Monthly,
        Self::ZipCodes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cities => "cities",
            Self::States => "states",
            Self::Payments => "payments",
            Self::Reviews => "reviews",
            Self::Status => "status",
            Self::Categories => "categories",
            Self::Monthly => "monthly",
            Self::ZipCodes => "zip-codes",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Cities => "Customers by City",
            Self::States => "Customers by State",
            Self::Payments => "Payment Methods",
            Self::Reviews => "Review Scores by Category",
            Self::Status => "Order Status Distribution",
            Self::Categories => "Most and Least Sold Categories",
            Self::Monthly => "Orders per Month",
            Self::ZipCodes => "Zip Codes by City",
        }
    }

    /// Row limit applied when the caller passes none; `None` means the
    /// report does not accept a limit.
    pub fn default_limit(self) -> Option<usize> {
        match self {
            Self::Cities | Self::Reviews => Some(10),
            Self::Categories => Some(5),
            _ => None,
        }
    }

    pub fn command_name(self) -> String {
        format!("report {}", self.as_str())
    }
}

#[derive(Debug)]
pub struct ReportRunOptions {
    pub kind: ReportKind,
    pub path: String,
    pub limit: Option<usize>,
    pub state: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(
    kind: ReportKind,
    path: &str,
    limit: Option<usize>,
    state: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ReportRunOptions {
        kind,
        path: path.to_string(),
        limit,
        state: state.map(std::string::ToString::to_string),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ReportRunOptions) -> ClientResult<SuccessEnvelope> {
    let kind = options.kind;
    let command = kind.command_name();
    let limit = resolve_limit(kind, options.limit, &command)?;
    let state = resolve_state(kind, options.state, &command)?;

    let (source, skipped_rows, result) = match kind {
        ReportKind::Cities => {
            let (source, lines) = load_order_attributes(&options.path, options.stdin_override)?;
            let tally = reports::customers_by_city(&lines, limit);
            counts(source, tally)
        }
        ReportKind::States => {
            let (source, lines) = load_order_attributes(&options.path, options.stdin_override)?;
            counts(source, reports::customers_by_state(&lines))
        }
        ReportKind::Status => {
            let (source, lines) = load_order_attributes(&options.path, options.stdin_override)?;
            counts(source, reports::order_status_distribution(&lines))
        }
        ReportKind::Monthly => {
            let (source, lines) = load_order_attributes(&options.path, options.stdin_override)?;
            counts(source, reports::monthly_orders(&lines))
        }
        ReportKind::Reviews => {
            let (source, lines) = load_order_attributes(&options.path, options.stdin_override)?;
            let tally = reports::review_scores_by_category(&lines, limit);
            let rows = tally
                .rows
                .into_iter()
                .map(|row| ReviewScoreRow {
                    category: row.category,
                    average_score: row.average_score,
                    reviews: row.reviews,
                })
                .collect();
            (
                source,
                tally.skipped_rows,
                ReportRows::ReviewScores { rows },
            )
        }
        ReportKind::Categories => {
            let (source, lines) = load_order_attributes(&options.path, options.stdin_override)?;
            let volumes = reports::category_volumes(&lines, limit.unwrap_or_default());
            (
                source,
                volumes.skipped_rows,
                ReportRows::CategoryVolumes {
                    most_sold: count_rows(&volumes.most_sold),
                    least_sold: count_rows(&volumes.least_sold),
                },
            )
        }
        ReportKind::Payments => {
            let (source, payments) = load_payments(&options.path, options.stdin_override)?;
            let tally = reports::payment_methods(&payments);
            let rows = tally
                .rows
                .into_iter()
                .map(|row| PaymentMethodRow {
                    payment_type: row.payment_type,
                    average_value: row.average_value,
                    transactions: row.transactions,
                })
                .collect();
            (
                source,
                tally.skipped_rows,
                ReportRows::PaymentMethods { rows },
            )
        }
        ReportKind::ZipCodes => {
            let (source, records) = load_geolocation(&options.path, options.stdin_override)?;
            let wanted = state.as_deref().unwrap_or_default();
            counts(source, reports::zip_codes_by_city(&records, wanted))
        }
    };

    let data = ReportData {
        report: kind.as_str().to_string(),
        title: kind.title().to_string(),
        source: source_summary(&source),
        skipped_rows,
        state,
        limit,
        result,
    };

    success(&command, data)
}

fn counts(source: LoadedSource, tally: Tally<LabelCount>) -> (LoadedSource, usize, ReportRows) {
    let rows = count_rows(&tally.rows);
    (source, tally.skipped_rows, ReportRows::Counts { rows })
}

fn resolve_limit(
    kind: ReportKind,
    requested: Option<usize>,
    command: &str,
) -> ClientResult<Option<usize>> {
    let Some(default_limit) = kind.default_limit() else {
        if requested.is_some() {
            return Err(ClientError::invalid_argument_for_command(
                &format!("`{command}` does not accept --limit."),
                Some(command),
            ));
        }
        return Ok(None);
    };

    let value = requested.unwrap_or(default_limit);
    require_positive("--limit", value, command)?;
    Ok(Some(value))
}

fn resolve_state(
    kind: ReportKind,
    requested: Option<String>,
    command: &str,
) -> ClientResult<Option<String>> {
    let normalized = requested
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    match (kind, normalized) {
        (ReportKind::ZipCodes, Some(value)) => Ok(Some(value.to_uppercase())),
        (ReportKind::ZipCodes, None) => Err(ClientError::invalid_argument_for_command(
            "`report zip-codes` requires --state <UF>, for example --state SP.",
            Some(command),
        )),
        (_, Some(_)) => Err(ClientError::invalid_argument_for_command(
            &format!("`{command}` does not accept --state."),
            Some(command),
        )),
        (_, None) => Ok(None),
    }
}
