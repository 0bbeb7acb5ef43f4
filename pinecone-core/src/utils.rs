use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Renders a body for logging: indented JSON when the bytes parse as JSON,
/// the raw (lossy UTF-8) text otherwise, and an empty string for an empty body.
pub fn to_pretty_json(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned()),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// Serde adapter for fields that hold opaque JSON *text* (metadata) but must
/// travel as an embedded JSON value, not as a quoted string.
pub mod json_text {
    use super::*;

    pub fn serialize<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            serde::ser::Error::custom(format!("metadata is not valid JSON: {}", e))
        })?;
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

/// Same as [`json_text`] for optional fields.
pub mod opt_json_text {
    use super::*;

    pub fn serialize<S: Serializer>(text: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match text {
            Some(text) => json_text::serialize(text, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(other) => Some(other.to_string()),
        })
    }
}
