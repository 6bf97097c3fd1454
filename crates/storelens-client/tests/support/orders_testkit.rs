#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_json::Value;
use storelens_client::dataset::OrderLine;
use storelens_client::{ClientResult, SuccessEnvelope};
use tempfile::{Builder, TempDir};

pub const ORDER_HEADER: &str = "customer_unique_id,order_id,order_purchase_timestamp,price,quantity";

pub fn at(value: &str) -> NaiveDateTime {
    let parsed = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S");
    assert!(parsed.is_ok(), "bad fixture timestamp {value}");
    parsed.unwrap_or_default()
}

pub fn order_line(customer: &str, order: &str, timestamp: &str, price: f64, quantity: f64) -> OrderLine {
    OrderLine::new(customer, order, at(timestamp), price, quantity)
}

/// A buys once on the last day (100), B twice a month earlier (500 total),
/// C once a year earlier (10).
pub fn three_customer_lines() -> Vec<OrderLine> {
    vec![
        order_line("A", "a-1", "2018-08-29 14:00:00", 100.0, 1.0),
        order_line("B", "b-1", "2018-06-10 09:30:00", 150.0, 2.0),
        order_line("B", "b-2", "2018-07-30 20:15:00", 100.0, 2.0),
        order_line("C", "c-1", "2017-08-29 08:00:00", 5.0, 2.0),
    ]
}

pub fn three_customer_csv() -> String {
    let mut body = format!("{ORDER_HEADER}\n");
    for line in three_customer_lines() {
        body.push_str(&format!(
            "{},{},{},{},{}\n",
            line.customer_unique_id,
            line.order_id,
            line.order_purchase_timestamp.format("%Y-%m-%d %H:%M:%S"),
            line.price,
            line.quantity
        ));
    }
    body
}

pub fn fixture_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let result = fs::write(&path, body);
    assert!(result.is_ok());
    path
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
