//! Validation messages from API error bodies.

use serde_json::Value;

/// Collect every scalar leaf of `body`, regardless of key.
///
/// Objects are walked in key order, arrays in element order. Numbers and
/// booleans are rendered as text; nulls are skipped.
pub fn extract_messages(body: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect(body, &mut out);
    out
}

fn collect(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push(s.clone()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect(v, out)),
    }
}
