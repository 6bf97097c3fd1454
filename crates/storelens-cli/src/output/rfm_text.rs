use std::io;

use serde_json::Value;

use super::format::{self, Column};

const SEGMENT_BAR_WIDTH: usize = 30;

pub fn render_rfm(data: &Value) -> io::Result<String> {
    let segments = data
        .get("segments")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("rfm output requires segments"))?;
    let top = data
        .get("top")
        .ok_or_else(|| io::Error::other("rfm output requires top customer views"))?;

    let customer_count = data.get("customer_count").and_then(Value::as_u64).unwrap_or(0);
    let mut lines = vec![
        format!(
            "RFM segmentation of {} customers",
            format::grouped(customer_count)
        ),
        String::new(),
        "Summary:".to_string(),
    ];
    lines.extend(format::key_value_rows(&summary_entries(data), 2));

    lines.push(String::new());
    lines.push("Segments:".to_string());
    lines.extend(render_segments(segments, customer_count));

    let limit = top.get("limit").and_then(Value::as_u64).unwrap_or(0);
    let views = [
        ("by_recency", "Most recent"),
        ("by_frequency", "Most frequent"),
        ("by_monetary", "Highest spend"),
        ("by_score", "Highest RFM score"),
    ];
    for (key, title) in views {
        let rows = top.get(key).and_then(Value::as_array).cloned().unwrap_or_default();
        lines.push(String::new());
        lines.push(format!("{title} (top {limit}):"));
        lines.extend(render_customers(&rows));
    }

    Ok(lines.join("\n"))
}

fn summary_entries(data: &Value) -> Vec<(&'static str, String)> {
    let source = data.get("source").cloned().unwrap_or(Value::Null);
    let origin = source
        .get("source_ref")
        .and_then(Value::as_str)
        .unwrap_or("stdin")
        .to_string();
    vec![
        ("Source:", origin),
        ("Format:", text_field(&source, "format")),
        (
            "Rows read:",
            format::grouped(source.get("rows_read").and_then(Value::as_u64).unwrap_or(0)),
        ),
        ("Reference date:", text_field(data, "reference_date")),
        ("Policy:", text_field(data, "policy_version")),
    ]
}

fn render_segments(segments: &[Value], customer_count: u64) -> Vec<String> {
    let columns = [
        Column::left("Segment"),
        Column::right("Customers"),
        Column::right("Share"),
        Column::left(""),
    ];
    let largest = segments
        .iter()
        .filter_map(|segment| segment.get("customers").and_then(Value::as_u64))
        .max()
        .unwrap_or(0);

    let rows = segments
        .iter()
        .map(|segment| {
            let customers = segment.get("customers").and_then(Value::as_u64).unwrap_or(0);
            let share = if customer_count == 0 {
                0.0
            } else {
                (customers as f64 / customer_count as f64) * 100.0
            };
            vec![
                text_field(segment, "segment"),
                format::grouped(customers),
                format!("{}%", format::decimal(share, 1)),
                format::bar(customers as f64, largest as f64, SEGMENT_BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &rows, format::terminal_width(), "Segment")
}

fn render_customers(rows: &[Value]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["  No customers.".to_string()];
    }

    let columns = [
        Column::left("Customer"),
        Column::left("Last purchase"),
        Column::right("Recency"),
        Column::right("Orders"),
        Column::right("Monetary"),
        Column::right("Score"),
        Column::left("Segment"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "customer_unique_id"),
                text_field(row, "last_purchase_at"),
                format!("{}d", row.get("recency").and_then(Value::as_i64).unwrap_or(0)),
                row.get("frequency")
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
                    .to_string(),
                format::decimal(number_field(row, "monetary"), 2),
                format::decimal(number_field(row, "rfm_score"), 2),
                text_field(row, "customer_segment"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows, format::terminal_width(), "Customer")
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn number_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
