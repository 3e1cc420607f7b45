use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a stored value as a number. Numbers and numeric strings parse;
/// nulls, blanks, garbage strings, booleans, containers and non-finite
/// results are all absent. Invalid and missing are deliberately the same.
pub fn parse_optional_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_optional_str(s),
        _ => None,
    }
}

/// String form of [`parse_optional_number`], used for CSV cells.
pub fn parse_optional_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Two-decimal rounding, half away from zero on `value * 100`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// serde hook: any JSON value into `Option<f64>` via [`parse_optional_number`].
pub fn de_tolerant_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_optional_number))
}
