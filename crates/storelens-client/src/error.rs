use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ImportIssue, ImportSummary};

pub(crate) const IMPORT_HELP_COMMAND: &str = "storelens rfm --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `storelens {cmd} --help` for usage."),
            None => "Run `storelens --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_import_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_import_format",
            message,
            vec![
                "Provide a JSON array of objects or a CSV file with a header row.".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to confirm field requirements."),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    /// A required field is absent from a record the engine was handed.
    pub fn missing_field(field: &str, detail: &str) -> Self {
        Self::new(
            "missing_field",
            &format!("Required field `{field}` is missing: {detail}"),
            vec![
                format!("Populate `{field}` on every record."),
                "Clean the dataset upstream and rerun.".to_string(),
            ],
        )
        .with_data(json!({
            "field": field,
        }))
    }

    /// A field is present but its value cannot be scored as-is.
    pub fn invalid_value(field: &str, detail: &str) -> Self {
        Self::new(
            "invalid_value",
            &format!("Field `{field}` has an invalid value: {detail}"),
            vec![
                format!("Fix the `{field}` values in the source dataset."),
                "Clean the dataset upstream and rerun.".to_string(),
            ],
        )
        .with_data(json!({
            "field": field,
        }))
    }

    pub fn empty_dataset(dataset: &str) -> Self {
        Self::new(
            "empty_dataset",
            &format!("No {dataset} rows were provided; there is nothing to analyze."),
            vec![
                "Check that the source file has a header row followed by data rows.".to_string(),
                "Rerun once the export contains at least one row.".to_string(),
            ],
        )
        .with_data(json!({
            "dataset": dataset,
        }))
    }

    /// `missing` pairs each absent header with the value type it expects.
    pub fn missing_headers(
        dataset: &str,
        missing: &[(&str, &str)],
        actual_headers: Vec<String>,
    ) -> Self {
        let missing_headers = missing.iter().map(|(name, _)| *name).collect::<Vec<&str>>();
        let expected_types = missing
            .iter()
            .map(|(name, kind)| ((*name).to_string(), Value::from(*kind)))
            .collect::<serde_json::Map<String, Value>>();
        let listed = missing_headers.join(", ");
        Self::new(
            "missing_field",
            &format!("CSV headers are missing required {dataset} fields: {listed}."),
            vec![
                "Include every required header; extra columns are ignored.".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to review required fields."),
            ],
        )
        .with_data(json!({
            "dataset": dataset,
            "missing_headers": missing_headers,
            "expected_types": expected_types,
            "actual_headers": actual_headers,
        }))
    }

    pub fn import_validation_failed(summary: ImportSummary, issues: Vec<ImportIssue>) -> Self {
        let only_missing = issues.iter().all(|issue| issue.code == "missing_field");
        let code = if only_missing {
            "missing_field"
        } else {
            "invalid_value"
        };
        let invalid_rows = summary.rows_invalid;
        Self::new(
            code,
            &format!("Input failed validation: {invalid_rows} rows need fixes. Nothing was scored."),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Then rerun the same command.".to_string(),
            ],
        )
        .with_data(json!({
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
