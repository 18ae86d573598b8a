//! Field-level fallbacks for decoding the site config.
//!
//! Used through `#[serde(deserialize_with = "...")]` on every content field.
//! A null or wrongly typed value yields the field's default instead of
//! failing the whole section, and list elements are decoded one by one so a
//! bad entry is skipped without emptying the list. Containers using these
//! must also carry `#[serde(default)]` so absent fields stay optional.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Text field: strings as-is, numbers and booleans as written, anything else
/// empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional text field: like [`text`], with null and unusable values as
/// `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// Nested record; null or malformed gives `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode(&value).unwrap_or_default())
}

/// Optional nested record; null or malformed gives `None`.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode(&value))
}

/// List decoded element by element; a non-list gives an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(optional_list(deserializer)?.unwrap_or_default())
}

/// Like [`list`], keeping null and non-list values apart as `None`.
pub fn optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(values) => Ok(Some(values.iter().filter_map(decode).collect())),
        other => {
            warn!("Ignoring site config {} where a list was expected", kind(&other));
            Ok(None)
        }
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if value.is_null() {
        return None;
    }

    T::deserialize(value)
        .map_err(|err| warn!("Ignoring malformed site config value: {}", err))
        .ok()
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!("Ignoring site config {} where text was expected", kind(&other));
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
