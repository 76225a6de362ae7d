pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The payload of a computation envelope, or the value itself.
pub(crate) fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split an object into scalar fields and lists of records (alerts,
/// savings entries, per-credit interest, ...).
pub(crate) fn split_sections(map: &Map<String, Value>) -> (Vec<(&str, &Value)>, Vec<(&str, &[Value])>) {
    let mut scalars = Vec::new();
    let mut lists = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) => {
                lists.push((key.as_str(), items.as_slice()))
            }
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, lists)
}

/// Column headers for a list of records: first-seen key order across rows.
pub(crate) fn headers(rows: &[Value]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !out.iter().any(|h| h == key) {
                    out.push(key.clone());
                }
            }
        }
    }
    out
}
