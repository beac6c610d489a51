//! Read request decoding
//!
//! A recognized key counts as supplied only when it holds a non-empty
//! string. Numbers, booleans, null and `""` all decode to `None`, and
//! unrecognized keys are ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Recognized read keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub school_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub student_last_name: Option<String>,
}

impl QueryRequest {
    /// Decode from a query object; anything other than an object supplies nothing
    pub fn from_value(input: &Value) -> Self {
        match input {
            Value::Object(_) => QueryRequest::deserialize(input).unwrap_or_default(),
            _ => QueryRequest::default(),
        }
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}
