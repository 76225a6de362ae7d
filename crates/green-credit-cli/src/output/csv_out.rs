use serde_json::Value;
use std::io;

use super::{headers, payload, split_sections};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// A bare list of records becomes one row per record. An object whose only
/// list is a set of records (alerts, savings, validations) writes that list;
/// anything else falls back to field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match payload(value) {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => {
            let (scalars, lists) = split_sections(map);
            match lists.as_slice() {
                [(_, rows)] => write_rows(&mut wtr, rows),
                _ => write_pairs(&mut wtr, scalars),
            }
        }
        other => wtr.write_record([field(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        log::error!("could not write CSV output: {e}");
    }
}

fn write_pairs(wtr: &mut StdoutWriter<'_>, pairs: Vec<(&str, &Value)>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in pairs {
        wtr.write_record([key.to_string(), field(val)])?;
    }
    Ok(())
}

fn write_rows(wtr: &mut StdoutWriter<'_>, rows: &[Value]) -> csv::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    if !rows.iter().all(Value::is_object) {
        for row in rows {
            wtr.write_record([field(row)])?;
        }
        return Ok(());
    }

    let columns = headers(rows);
    wtr.write_record(&columns)?;
    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| row.get(c.as_str()).map(field).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

fn field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
