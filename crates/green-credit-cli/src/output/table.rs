use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{headers, payload, split_sections};

/// Render output as tables: one Field/Value table for scalar fields, then
/// one table per list of records.
pub fn print_table(value: &Value) {
    match payload(value) {
        Value::Object(map) => print_object(map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", cell(other)),
    }

    if let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) {
        print_envelope_notes(envelope);
    }
}

fn print_object(map: &Map<String, Value>) {
    let (scalars, lists) = split_sections(map);

    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.to_string(), cell(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, rows) in lists {
        println!("\n{}", key.bold());
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(none)");
        return;
    }
    if !rows.iter().all(Value::is_object) {
        for row in rows {
            println!("{}", cell(row));
        }
        return;
    }

    let columns = headers(rows);
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| row.get(c.as_str()).map(cell).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
