use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::dataset::{GeolocationRecord, OrderLine, PaymentRecord};
use crate::import::parse::ParsedRow;
use crate::{ClientError, ClientResult};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];
const TIMESTAMP_EXPECTED: &str = "YYYY-MM-DD HH:MM:SS (or YYYY-MM-DD)";
const AMOUNT_EXPECTED: &str = "finite number >= 0";

#[derive(Debug, Clone)]
pub(crate) struct Validated<T> {
    pub(crate) records: Vec<T>,
    pub(crate) summary: ImportSummary,
}

pub(crate) fn validate_orders(parsed_rows: Vec<ParsedRow>) -> ClientResult<Validated<OrderLine>> {
    validate_order_rows(parsed_rows, true)
}

/// Same checks as [`validate_orders`], except a blank or absent `price` or
/// `quantity` reads as zero. Present amounts must still be valid.
pub(crate) fn validate_order_attributes(
    parsed_rows: Vec<ParsedRow>,
) -> ClientResult<Validated<OrderLine>> {
    validate_order_rows(parsed_rows, false)
}

fn validate_order_rows(
    parsed_rows: Vec<ParsedRow>,
    amounts_required: bool,
) -> ClientResult<Validated<OrderLine>> {
    validate_with(parsed_rows, |raw, issues| {
        let customer_unique_id = required_string(raw, "customer_unique_id", issues);
        let order_id = required_string(raw, "order_id", issues);
        let purchased_at = required_timestamp(raw, "order_purchase_timestamp", issues);
        let (price, quantity) = if amounts_required {
            (
                required_amount(raw, "price", issues),
                required_amount(raw, "quantity", issues),
            )
        } else {
            (
                optional_amount(raw, "price", issues),
                optional_amount(raw, "quantity", issues),
            )
        };
        let review_score = optional_review_score(raw, issues);

        let customer_id = optional_string(raw.take("customer_id"));
        let customer_city = optional_string(raw.take("customer_city"));
        let customer_state = optional_string(raw.take("customer_state"));
        let order_status = optional_string(raw.take("order_status"));
        let product_id = optional_string(raw.take("product_id"));
        let product_category = optional_string(raw.take("product_category"));

        let (
            Some(customer_unique_id),
            Some(order_id),
            Some(order_purchase_timestamp),
            Some(price),
            Some(quantity),
        ) = (customer_unique_id, order_id, purchased_at, price, quantity)
        else {
            return None;
        };

        Some(OrderLine {
            customer_unique_id,
            order_id,
            order_purchase_timestamp,
            price,
            quantity,
            customer_id,
            customer_city,
            customer_state,
            order_status,
            product_id,
            product_category,
            review_score,
        })
    })
}

pub(crate) fn validate_payments(
    parsed_rows: Vec<ParsedRow>,
) -> ClientResult<Validated<PaymentRecord>> {
    validate_with(parsed_rows, |raw, issues| {
        let order_id = required_string(raw, "order_id", issues);
        let payment_type = required_string(raw, "payment_type", issues);
        let payment_value = required_amount(raw, "payment_value", issues);

        Some(PaymentRecord {
            order_id: order_id?,
            payment_type: payment_type?,
            payment_value: payment_value?,
        })
    })
}

pub(crate) fn validate_geolocation(
    parsed_rows: Vec<ParsedRow>,
) -> ClientResult<Validated<GeolocationRecord>> {
    validate_with(parsed_rows, |raw, issues| {
        let zip_code_prefix = required_string(raw, "geolocation_zip_code_prefix", issues);
        let city = required_string(raw, "geolocation_city", issues);
        let state = required_string(raw, "geolocation_state", issues);

        Some(GeolocationRecord {
            zip_code_prefix: zip_code_prefix?,
            city: city?,
            state: state?,
        })
    })
}

// All rows are checked before failing so one run reports every issue.
fn validate_with<T, F>(parsed_rows: Vec<ParsedRow>, mut build: F) -> ClientResult<Validated<T>>
where
    F: FnMut(&mut ParsedRow, &mut Vec<ImportIssue>) -> Option<T>,
{
    let total_rows = parsed_rows.len();
    let mut records = Vec::with_capacity(total_rows);
    let mut issues = Vec::new();

    for mut raw in parsed_rows {
        let mut row_issues = Vec::new();
        let record = build(&mut raw, &mut row_issues);
        match record {
            Some(value) if row_issues.is_empty() => records.push(value),
            _ => issues.extend(row_issues),
        }
    }

    let summary = ImportSummary {
        rows_read: total_rows as i64,
        rows_valid: records.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(summary, issues));
    }

    Ok(Validated { records, summary })
}

fn required_string(raw: &mut ParsedRow, field: &str, issues: &mut Vec<ImportIssue>) -> Option<String> {
    let normalized = optional_string(raw.take(field));
    if normalized.is_none() {
        issues.push(missing(raw.row, field, "non-empty string"));
    }
    normalized
}

fn required_timestamp(
    raw: &mut ParsedRow,
    field: &str,
    issues: &mut Vec<ImportIssue>,
) -> Option<NaiveDateTime> {
    let Some(candidate) = optional_string(raw.take(field)) else {
        issues.push(missing(raw.row, field, TIMESTAMP_EXPECTED));
        return None;
    };

    let parsed = parse_timestamp(&candidate);
    if parsed.is_none() {
        issues.push(invalid(
            raw.row,
            field,
            format!("{field} must be a timestamp; got \"{candidate}\""),
            TIMESTAMP_EXPECTED,
            candidate,
        ));
    }
    parsed
}

fn required_amount(raw: &mut ParsedRow, field: &str, issues: &mut Vec<ImportIssue>) -> Option<f64> {
    let Some(candidate) = optional_string(raw.take(field)) else {
        issues.push(missing(raw.row, field, AMOUNT_EXPECTED));
        return None;
    };
    parse_amount(raw.row, field, candidate, issues)
}

fn optional_amount(raw: &mut ParsedRow, field: &str, issues: &mut Vec<ImportIssue>) -> Option<f64> {
    match optional_string(raw.take(field)) {
        Some(candidate) => parse_amount(raw.row, field, candidate, issues),
        None => Some(0.0),
    }
}

fn parse_amount(
    row: i64,
    field: &str,
    candidate: String,
    issues: &mut Vec<ImportIssue>,
) -> Option<f64> {
    match candidate.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            issues.push(invalid(
                row,
                field,
                format!("{field} must be a non-negative number; got \"{candidate}\""),
                AMOUNT_EXPECTED,
                candidate,
            ));
            None
        }
    }
}

fn optional_review_score(raw: &mut ParsedRow, issues: &mut Vec<ImportIssue>) -> Option<f64> {
    let candidate = optional_string(raw.take("review_score"))?;
    match candidate.parse::<f64>() {
        Ok(value) if (1.0..=5.0).contains(&value) => Some(value),
        _ => {
            issues.push(invalid(
                raw.row,
                "review_score",
                format!("review_score must be between 1 and 5; got \"{candidate}\""),
                "number from 1 to 5",
                candidate,
            ));
            None
        }
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|current| {
        let trimmed = current.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn missing(row: i64, field: &str, expected: &str) -> ImportIssue {
    ImportIssue {
        row,
        field: field.to_string(),
        code: "missing_field".to_string(),
        description: format!("{field} must be present and non-empty."),
        expected: Some(expected.to_string()),
        received: Some(String::new()),
    }
}

fn invalid(row: i64, field: &str, description: String, expected: &str, received: String) -> ImportIssue {
    ImportIssue {
        row,
        field: field.to_string(),
        code: "invalid_value".to_string(),
        description,
        expected: Some(expected.to_string()),
        received: Some(received),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        parse_timestamp, validate_geolocation, validate_order_attributes, validate_orders,
        validate_payments,
    };
    use crate::import::DatasetKind;
    use crate::import::parse::parse_source;

    fn orders(body: &str) -> crate::ClientResult<super::Validated<crate::dataset::OrderLine>> {
        let parsed = parse_source(body, DatasetKind::Orders)?;
        validate_orders(parsed.rows)
    }

    #[test]
    fn accepted_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2018, 8, 29).and_then(|day| day.and_hms_opt(15, 0, 37));
        assert_eq!(parse_timestamp("2018-08-29 15:00:37"), expected);
        assert_eq!(parse_timestamp("2018-08-29T15:00:37"), expected);
        assert!(parse_timestamp("2018-08-29 15:00:37.250").is_some());
        assert_eq!(
            parse_timestamp("2018-08-29"),
            NaiveDate::from_ymd_opt(2018, 8, 29).and_then(|day| day.and_hms_opt(0, 0, 0))
        );
        assert!(parse_timestamp("29/08/2018").is_none());
    }

    #[test]
    fn valid_orders_carry_optional_attributes() {
        let result = orders(
            "customer_unique_id,order_id,order_purchase_timestamp,price,quantity,customer_city,review_score\n\
             c1,o1,2018-01-01 10:00:00,10.5,2,sao paulo,4\n\
             c2,o2,2018-01-02,3,1,,\n",
        );
        assert!(result.is_ok());
        if let Ok(validated) = result {
            assert_eq!(validated.summary.rows_valid, 2);
            assert_eq!(validated.records[0].customer_city.as_deref(), Some("sao paulo"));
            assert_eq!(validated.records[0].review_score, Some(4.0));
            assert_eq!(validated.records[1].customer_city, None);
            assert_eq!(validated.records[1].review_score, None);
        }
    }

    #[test]
    fn every_bad_row_is_reported_before_failing() {
        let result = orders(
            "customer_unique_id,order_id,order_purchase_timestamp,price,quantity\n\
             c1,o1,2018-01-01 10:00:00,-1,1\n\
             c2,o2,not-a-date,3,1\n\
             c3,o3,2018-01-03 10:00:00,3,1\n",
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_value");
            let data = error.data.unwrap_or_default();
            assert_eq!(data["summary"]["rows_invalid"], 2);
            assert_eq!(data["summary"]["rows_valid"], 1);
            assert_eq!(data["issues"][0]["field"], "price");
            assert_eq!(data["issues"][1]["field"], "order_purchase_timestamp");
        }
    }

    #[test]
    fn blank_required_values_fail_as_missing_field() {
        let result = orders(
            "customer_unique_id,order_id,order_purchase_timestamp,price,quantity\n\
             ,o1,2018-01-01 10:00:00,1,1\n",
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "missing_field");
        }
    }

    #[test]
    fn review_score_outside_scale_is_invalid() {
        let result = orders(
            "customer_unique_id,order_id,order_purchase_timestamp,price,quantity,review_score\n\
             c1,o1,2018-01-01 10:00:00,1,1,7\n",
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_value");
        }
    }

    #[test]
    fn order_attributes_read_absent_amounts_as_zero_but_check_present_ones() {
        let result = parse_source(
            "customer_unique_id,order_id,order_purchase_timestamp,price,order_status\n\
             c1,o1,2018-01-01 10:00:00,,delivered\n\
             c2,o2,2018-01-02 10:00:00,12.5,shipped\n",
            DatasetKind::OrderAttributes,
        )
        .and_then(|parsed| validate_order_attributes(parsed.rows));
        assert!(result.is_ok());
        if let Ok(validated) = result {
            assert_eq!(validated.records[0].price, 0.0);
            assert_eq!(validated.records[0].quantity, 0.0);
            assert_eq!(validated.records[1].price, 12.5);
            assert_eq!(validated.records[1].order_status.as_deref(), Some("shipped"));
        }

        let negative = parse_source(
            "customer_unique_id,order_id,order_purchase_timestamp,quantity\n\
             c1,o1,2018-01-01 10:00:00,-2\n",
            DatasetKind::OrderAttributes,
        )
        .and_then(|parsed| validate_order_attributes(parsed.rows));
        assert!(negative.is_err());
        if let Err(error) = negative {
            assert_eq!(error.code, "invalid_value");
        }
    }

    #[test]
    fn payments_and_geolocation_validate_their_own_fields() {
        let payments = parse_source(
            "order_id,payment_type,payment_value\no1,credit_card,10\no2,boleto,abc\n",
            DatasetKind::Payments,
        )
        .and_then(|parsed| validate_payments(parsed.rows));
        assert!(payments.is_err());
        if let Err(error) = payments {
            assert_eq!(error.code, "invalid_value");
        }

        let geolocation = parse_source(
            "geolocation_zip_code_prefix,geolocation_city,geolocation_state\n01037,sao paulo,SP\n",
            DatasetKind::Geolocation,
        )
        .and_then(|parsed| validate_geolocation(parsed.rows));
        assert!(geolocation.is_ok());
        if let Ok(validated) = geolocation {
            assert_eq!(validated.records[0].zip_code_prefix, "01037");
            assert_eq!(validated.records[0].state, "SP");
        }
    }
}
