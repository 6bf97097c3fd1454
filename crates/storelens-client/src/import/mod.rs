pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use tracing::debug;

use crate::ClientError;
use crate::ClientResult;
use crate::commands::common::{
    FieldSpec, OPTIONAL_ORDER_AMOUNT_FIELDS, OPTIONAL_ORDER_FIELDS, REQUIRED_GEOLOCATION_FIELDS,
    REQUIRED_ORDER_ATTRIBUTE_FIELDS, REQUIRED_ORDER_FIELDS, REQUIRED_PAYMENT_FIELDS,
};
use crate::dataset::{GeolocationRecord, OrderLine, PaymentRecord};
use crate::error::IMPORT_HELP_COMMAND;
use crate::import::input::SourceKind;
use crate::import::parse::{ParsedSource, SourceFormat};

/// Which export a source is expected to hold; decides the accepted columns.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum DatasetKind {
    Orders,
    /// Order export read only for its descriptive attributes.
    OrderAttributes,
    Payments,
    Geolocation,
}

impl DatasetKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Orders | Self::OrderAttributes => "order",
            Self::Payments => "payment",
            Self::Geolocation => "geolocation",
        }
    }

    pub(crate) fn required_fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Orders => &REQUIRED_ORDER_FIELDS,
            Self::OrderAttributes => &REQUIRED_ORDER_ATTRIBUTE_FIELDS,
            Self::Payments => &REQUIRED_PAYMENT_FIELDS,
            Self::Geolocation => &REQUIRED_GEOLOCATION_FIELDS,
        }
    }

    pub(crate) fn fields(self) -> Vec<FieldSpec> {
        let mut fields = self.required_fields().to_vec();
        if self == Self::OrderAttributes {
            fields.extend_from_slice(&OPTIONAL_ORDER_AMOUNT_FIELDS);
        }
        if matches!(self, Self::Orders | Self::OrderAttributes) {
            fields.extend_from_slice(&OPTIONAL_ORDER_FIELDS);
        }
        fields
    }
}

/// Where a dataset came from, for the response envelope.
#[derive(Debug, Clone)]
pub(crate) struct LoadedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) format: SourceFormat,
    pub(crate) rows_read: i64,
}

pub(crate) fn load_orders(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<(LoadedSource, Vec<OrderLine>)> {
    let (source, parsed) = read_dataset(path, stdin_override, DatasetKind::Orders)?;
    let validated = validate::validate_orders(parsed.rows)?;
    Ok((source, validated.records))
}

/// Loads an order export for the descriptive reports. `price` and
/// `quantity` may be absent and then read as zero.
pub(crate) fn load_order_attributes(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<(LoadedSource, Vec<OrderLine>)> {
    let (source, parsed) = read_dataset(path, stdin_override, DatasetKind::OrderAttributes)?;
    let validated = validate::validate_order_attributes(parsed.rows)?;
    Ok((source, validated.records))
}

pub(crate) fn load_payments(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<(LoadedSource, Vec<PaymentRecord>)> {
    let (source, parsed) = read_dataset(path, stdin_override, DatasetKind::Payments)?;
    let validated = validate::validate_payments(parsed.rows)?;
    Ok((source, validated.records))
}

pub(crate) fn load_geolocation(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<(LoadedSource, Vec<GeolocationRecord>)> {
    let (source, parsed) = read_dataset(path, stdin_override, DatasetKind::Geolocation)?;
    let validated = validate::validate_geolocation(parsed.rows)?;
    Ok((source, validated.records))
}

fn read_dataset(
    path: &str,
    stdin_override: Option<String>,
    kind: DatasetKind,
) -> ClientResult<(LoadedSource, ParsedSource)> {
    let resolved = input::resolve_source(path, stdin_override)?;
    let parsed = parse::parse_source(&resolved.content, kind)?;
    debug!(
        dataset = kind.name(),
        format = parsed.format.as_str(),
        rows = parsed.rows.len(),
        "parsed dataset"
    );

    let source = LoadedSource {
        source_kind: resolved.source_kind,
        source_ref: resolved.source_ref,
        format: parsed.format,
        rows_read: parsed.rows.len() as i64,
    };
    Ok((source, parsed))
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide JSON array or CSV input via path or `-` for stdin.".to_string(),
            format!("Run `{IMPORT_HELP_COMMAND}` to confirm field requirements."),
        ],
    )
}
