use serde_json::Value;

use super::payload;

/// Headline figures, most specific first.
const HEADLINE_KEYS: [&str; 8] = [
    "percent_on_time",
    "distinct_active_clients",
    "total_interest_earned",
    "total_expected_savings",
    "monthly_payment",
    "remaining_balance",
    "state",
    "accepted",
];

/// Print just the headline answer.
///
/// Lists print one credit id per line (alerts, savings); objects print the
/// first headline key present, else their first field.
pub fn print_minimal(value: &Value) {
    match payload(value) {
        Value::Array(items) => {
            for item in items {
                println!("{}", item_label(item));
            }
        }
        Value::Object(map) => {
            if let Some(val) = HEADLINE_KEYS
                .iter()
                .filter_map(|k| map.get(*k))
                .find(|v| !v.is_null())
            {
                println!("{}", scalar(val));
            } else if let Some((key, val)) = map.iter().next() {
                println!("{key}: {}", scalar(val));
            }
        }
        other => println!("{}", scalar(other)),
    }
}

fn item_label(item: &Value) -> String {
    match item.get("credit_id").or_else(|| item.get("id")) {
        Some(id) => scalar(id),
        None => scalar(item),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
