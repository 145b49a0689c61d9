//! Deserializers for JSON written by hand or by a model, where a field that
//! is usually text or a number sometimes arrives as the other, or as null.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts strings, numbers and nulls for fields that are text in most
/// records but not all.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts numbers, numeric strings ("4", "4.0", "4 Hours") and nulls.
/// Anything without a leading number reads as 0.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(&s),
        _ => 0.0,
    })
}

fn leading_number(text: &str) -> f64 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    text[..end].parse().unwrap_or(0.0)
}
