use std::io;

use serde_json::Value;

use super::format::{self, Column};

const BAR_WIDTH: usize = 24;

pub fn render_report(data: &Value) -> io::Result<String> {
    let report = data
        .get("report")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("report output requires a report name"))?;
    let result = data
        .get("result")
        .ok_or_else(|| io::Error::other("report output requires a result"))?;

    let mut lines = vec![heading(data), String::new()];
    match report {
        "cities" => lines.extend(count_table(result, "City", "Customers")?),
        "states" => lines.extend(count_table(result, "State", "Customers")?),
        "status" => lines.extend(count_table(result, "Status", "Order lines")?),
        "monthly" => lines.extend(count_table(result, "Month", "Orders")?),
        "zip-codes" => lines.extend(count_table(result, "City", "Zip codes")?),
        "payments" => lines.extend(payment_table(result)?),
        "reviews" => lines.extend(review_table(result)?),
        "categories" => lines.extend(category_tables(result)?),
        other => {
            return Err(io::Error::other(format!(
                "unsupported report `{other}` for text output"
            )));
        }
    }

    let skipped = data.get("skipped_rows").and_then(Value::as_u64).unwrap_or(0);
    if skipped > 0 {
        lines.push(String::new());
        lines.push(format!(
            "Skipped {} rows without the grouped attribute.",
            format::grouped(skipped)
        ));
    }

    Ok(lines.join("\n"))
}

fn heading(data: &Value) -> String {
    let title = data.get("title").and_then(Value::as_str).unwrap_or("Report");
    let source = data.get("source").cloned().unwrap_or(Value::Null);
    let origin = source
        .get("source_ref")
        .and_then(Value::as_str)
        .unwrap_or("stdin");
    let rows_read = source.get("rows_read").and_then(Value::as_u64).unwrap_or(0);

    let mut heading = format!("{title} ({origin}, {} rows)", format::grouped(rows_read));
    if let Some(state) = data.get("state").and_then(Value::as_str) {
        heading.push_str(&format!(" in {state}"));
    }
    heading
}

fn rows_of<'a>(result: &'a Value, key: &str) -> io::Result<&'a Vec<Value>> {
    result
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("report output requires `{key}`")))
}

fn count_table(result: &Value, label: &str, metric: &str) -> io::Result<Vec<String>> {
    let rows = rows_of(result, "rows")?;
    Ok(render_counts(rows, label, metric))
}

fn render_counts(rows: &[Value], label: &str, metric: &str) -> Vec<String> {
    if rows.is_empty() {
        return vec!["  No rows.".to_string()];
    }

    let largest = rows
        .iter()
        .filter_map(|row| row.get("count").and_then(Value::as_u64))
        .max()
        .unwrap_or(0);
    let columns = [Column::left(label), Column::right(metric), Column::left("")];
    let table_rows = rows
        .iter()
        .map(|row| {
            let count = row.get("count").and_then(Value::as_u64).unwrap_or(0);
            vec![
                row.get("label")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                format::grouped(count),
                format::bar(count as f64, largest as f64, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows, format::terminal_width(), label)
}

fn payment_table(result: &Value) -> io::Result<Vec<String>> {
    let rows = rows_of(result, "rows")?;
    if rows.is_empty() {
        return Ok(vec!["  No rows.".to_string()]);
    }

    let columns = [
        Column::left("Payment type"),
        Column::right("Average value"),
        Column::right("Transactions"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("payment_type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                format::decimal(row.get("average_value").and_then(Value::as_f64).unwrap_or(0.0), 2),
                format::grouped(row.get("transactions").and_then(Value::as_u64).unwrap_or(0)),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    Ok(format::render_table(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Payment",
    ))
}

fn review_table(result: &Value) -> io::Result<Vec<String>> {
    let rows = rows_of(result, "rows")?;
    if rows.is_empty() {
        return Ok(vec!["  No rows.".to_string()]);
    }

    let columns = [
        Column::left("Category"),
        Column::right("Average score"),
        Column::right("Reviews"),
        Column::left(""),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let score = row.get("average_score").and_then(Value::as_f64).unwrap_or(0.0);
            vec![
                row.get("category")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                format::decimal(score, 2),
                format::grouped(row.get("reviews").and_then(Value::as_u64).unwrap_or(0)),
                format::bar(score, 5.0, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    Ok(format::render_table(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Category",
    ))
}

fn category_tables(result: &Value) -> io::Result<Vec<String>> {
    let most = rows_of(result, "most_sold")?;
    let least = rows_of(result, "least_sold")?;

    let mut lines = vec!["Most sold:".to_string()];
    lines.extend(render_counts(most, "Category", "Products"));
    lines.push(String::new());
    lines.push("Least sold:".to_string());
    lines.extend(render_counts(least, "Category", "Products"));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_report;

    #[test]
    fn count_reports_render_a_table_with_bars() {
        let data = json!({
            "report": "cities",
            "title": "Customers by City",
            "source": {"source_kind": "file", "source_ref": "orders.csv", "format": "csv", "rows_read": 1200},
            "skipped_rows": 3,
            "limit": 10,
            "result": {"rows": [
                {"label": "sao paulo", "count": 20},
                {"label": "campinas", "count": 5}
            ]}
        });
        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Customers by City (orders.csv, 1,200 rows)"));
            assert!(text.contains("City"));
            assert!(text.contains("sao paulo"));
            assert!(text.contains(&"#".repeat(24)));
            assert!(text.ends_with("Skipped 3 rows without the grouped attribute."));
        }
    }

    #[test]
    fn category_report_renders_both_lists() {
        let data = json!({
            "report": "categories",
            "title": "Most and Least Sold Categories",
            "source": {"source_kind": "stdin", "format": "csv", "rows_read": 9},
            "skipped_rows": 0,
            "limit": 1,
            "result": {
                "most_sold": [{"label": "bed_bath_table", "count": 3}],
                "least_sold": [{"label": "toys", "count": 1}]
            }
        });
        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Most and Least Sold Categories (stdin, 9 rows)"));
            assert!(text.contains("Most sold:"));
            assert!(text.contains("Least sold:"));
            assert!(text.contains("toys"));
            assert!(!text.contains("Skipped"));
        }
    }

    #[test]
    fn zip_code_heading_names_the_state_and_empty_results_say_so() {
        let data = json!({
            "report": "zip-codes",
            "title": "Zip Codes by City",
            "source": {"source_kind": "file", "source_ref": "geo.csv", "format": "csv", "rows_read": 4},
            "skipped_rows": 0,
            "state": "AC",
            "result": {"rows": []}
        });
        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Zip Codes by City (geo.csv, 4 rows) in AC"));
            assert!(text.contains("  No rows."));
        }
    }

    #[test]
    fn unknown_report_is_an_output_error() {
        let data = json!({"report": "weather", "result": {}});
        assert!(render_report(&data).is_err());
    }
}
