use crate::contracts::types::{CountRow, SourceSummary};
use crate::error::{ClientError, ClientResult};
use crate::import::LoadedSource;
use crate::reports::LabelCount;

/// One accepted input column. `aliases` are alternative header names seen in
/// real exports and map onto `name`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) kind: &'static str,
}

const fn field(name: &'static str, kind: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        aliases: &[],
        kind,
    }
}

pub(crate) const REQUIRED_ORDER_FIELDS: [FieldSpec; 5] = [
    field("customer_unique_id", "string"),
    field("order_id", "string"),
    field("order_purchase_timestamp", "datetime"),
    field("price", "number"),
    field("quantity", "number"),
];

/// Columns the descriptive order reports need; amounts become optional.
pub(crate) const REQUIRED_ORDER_ATTRIBUTE_FIELDS: [FieldSpec; 3] = [
    field("customer_unique_id", "string"),
    field("order_id", "string"),
    field("order_purchase_timestamp", "datetime"),
];

pub(crate) const OPTIONAL_ORDER_AMOUNT_FIELDS: [FieldSpec; 2] = [
    field("price", "number|null"),
    field("quantity", "number|null"),
];

pub(crate) const OPTIONAL_ORDER_FIELDS: [FieldSpec; 7] = [
    field("customer_id", "string|null"),
    field("customer_city", "string|null"),
    field("customer_state", "string|null"),
    field("order_status", "string|null"),
    field("product_id", "string|null"),
    FieldSpec {
        name: "product_category",
        aliases: &["product_category_name_english"],
        kind: "string|null",
    },
    field("review_score", "number|null"),
];

pub(crate) const REQUIRED_PAYMENT_FIELDS: [FieldSpec; 3] = [
    field("order_id", "string"),
    field("payment_type", "string"),
    field("payment_value", "number"),
];

pub(crate) const REQUIRED_GEOLOCATION_FIELDS: [FieldSpec; 3] = [
    field("geolocation_zip_code_prefix", "string"),
    field("geolocation_city", "string"),
    field("geolocation_state", "string"),
];

pub(crate) fn source_summary(source: &LoadedSource) -> SourceSummary {
    SourceSummary {
        source_kind: source.source_kind.as_str().to_string(),
        source_ref: source.source_ref.clone(),
        format: source.format.as_str().to_string(),
        rows_read: source.rows_read,
    }
}

pub(crate) fn count_rows(rows: &[LabelCount]) -> Vec<CountRow> {
    rows.iter()
        .map(|row| CountRow {
            label: row.label.clone(),
            count: row.count,
        })
        .collect()
}

pub(crate) fn require_positive(flag: &str, value: usize, command: &str) -> ClientResult<()> {
    if value == 0 {
        return Err(ClientError::invalid_argument_for_command(
            &format!("{flag} must be at least 1."),
            Some(command),
        ));
    }
    Ok(())
}
