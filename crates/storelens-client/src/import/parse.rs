use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::commands::common::FieldSpec;
use crate::import::{DatasetKind, invalid_input_error};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceFormat {
    Csv,
    JsonArray,
}

impl SourceFormat {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonArray => "json_array",
        }
    }
}

/// One input row with only the columns the dataset kind knows about, keyed
/// by canonical field name. Values are raw text; typing happens in
/// validation.
#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    values: HashMap<&'static str, String>,
}

impl ParsedRow {
    pub(crate) fn take(&mut self, field: &str) -> Option<String> {
        self.values.remove(field)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedSource {
    pub(crate) format: SourceFormat,
    pub(crate) rows: Vec<ParsedRow>,
}

pub(crate) fn parse_source(content: &str, kind: DatasetKind) -> ClientResult<ParsedSource> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::empty_dataset(kind.name()));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_import_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    let parsed = if trimmed.starts_with('[') {
        ParsedSource {
            format: SourceFormat::JsonArray,
            rows: parse_json_array(trimmed, kind)?,
        }
    } else if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_import_format(
            "JSON input must be a top-level array of objects.",
            "json_non_array",
        ));
    } else if looks_like_csv(trimmed) {
        ParsedSource {
            format: SourceFormat::Csv,
            rows: parse_csv(trimmed, kind)?,
        }
    } else {
        return Err(ClientError::invalid_import_format(
            "Unsupported input format. Provide a JSON array or CSV with headers.",
            "unknown",
        ));
    };

    if parsed.rows.is_empty() {
        return Err(ClientError::empty_dataset(kind.name()));
    }
    Ok(parsed)
}

fn parse_json_array(content: &str, kind: DatasetKind) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of objects.",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects.",
            ));
        };

        let mut values = HashMap::new();
        for spec in kind.fields() {
            if let Some(value) = read_optional_string(lookup_json(object, &spec)) {
                values.insert(spec.name, value);
            }
        }
        rows.push(ParsedRow {
            row: (index as i64) + 1,
            values,
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str, kind: DatasetKind) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<String>>();

    let missing = kind
        .required_fields()
        .iter()
        .filter(|spec| header_index(&headers, spec).is_none())
        .map(|spec| (spec.name, spec.kind))
        .collect::<Vec<(&str, &str)>>();
    if !missing.is_empty() {
        return Err(ClientError::missing_headers(kind.name(), &missing, headers));
    }

    let index_by_field = kind
        .fields()
        .into_iter()
        .filter_map(|spec| header_index(&headers, &spec).map(|index| (spec.name, index)))
        .collect::<Vec<(&'static str, usize)>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|error| {
            invalid_input_error(&format!(
                "CSV rows are malformed or not UTF-8 (data row {}): {error}",
                row_index + 1
            ))
        })?;

        let mut values = HashMap::new();
        for (name, index) in &index_by_field {
            if let Some(value) = record.get(*index) {
                values.insert(*name, value.to_string());
            }
        }
        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            values,
        });
    }

    Ok(rows)
}

fn header_index(headers: &[String], spec: &FieldSpec) -> Option<usize> {
    headers
        .iter()
        .position(|header| header == spec.name)
        .or_else(|| {
            headers
                .iter()
                .position(|header| spec.aliases.contains(&header.as_str()))
        })
}

fn lookup_json<'a>(object: &'a Map<String, Value>, spec: &FieldSpec) -> Option<&'a Value> {
    object.get(spec.name).or_else(|| {
        spec.aliases
            .iter()
            .find_map(|alias| object.get(*alias))
    })
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    // Integers keep their exact digits; ids above 2^53 would collide as f64.
    if let Some(number) = current.as_number() {
        if number.is_i64() || number.is_u64() {
            return Some(number.to_string());
        }
        if let Some(float_value) = number.as_f64() {
            return Some(float_value.to_string());
        }
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        serde_json::from_str::<Value>(line.trim())
            .map(|value| value.is_object())
            .unwrap_or(false)
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}
