//! Output schemas for the two parse modes, with tolerant field decoding.
//!
//! The model is asked for exact types but routinely returns `"5"` or `5.5` for a
//! year count, a comma-joined string for a list, or `""` for "not mentioned".
//! The decoders here normalize those shapes instead of rejecting the parse.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured fields extracted from a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "optional_years")]
    pub experience_years: Option<i32>,
    #[serde(default, deserialize_with = "optional_text")]
    pub education: Option<String>,
    #[serde(default, alias = "current_location", deserialize_with = "optional_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub github: Option<String>,
}

/// Trimmed non-empty string; numbers are stringified, anything else is absent.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| text_of(&v)))
}

/// A list of trimmed non-empty strings. Accepts an array or a comma-separated string.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items.iter().filter_map(text_of).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

/// Non-negative whole years. Floats are floored; strings use their leading number ("5+ years" → 5).
pub(crate) fn optional_years<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let years = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_number(&s),
        _ => None,
    };
    Ok(years
        .filter(|y| y.is_finite())
        .map(|y| y.floor().clamp(0.0, i32::MAX as f64) as i32))
}

fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
