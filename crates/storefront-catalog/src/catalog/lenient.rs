//! Tolerant deserializers for loosely typed catalog fields.
//!
//! The catalog API is authored by hand in a CMS. String lists sometimes arrive
//! as numbers, objects (`{"name": ...}`) or `null`. Quantities and flags show
//! up as strings. None of that may fail a whole fetch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keys tried, in order, when a list element is an object.
const NAME_KEYS: &[&str] = &["name", "slug"];
const IMAGE_KEYS: &[&str] = &["src", "url"];

fn string_list(values: Option<Vec<Value>>, object_keys: &[&str]) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Object(map) => object_keys
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        })
        .collect()
}

/// Category names, tags and attribute options.
///
/// Attribute options are declared numeric upstream but are usually strings.
pub(crate) fn names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer).map(|v| string_list(v, NAME_KEYS))
}

/// Image references.
pub(crate) fn images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer).map(|v| string_list(v, IMAGE_KEYS))
}

/// A string that may arrive as a number or `null`.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|value| match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// An integer that may arrive as a string, a float or `null`.
///
/// Anything that does not read as a number becomes `None`.
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|value| match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// A boolean that may arrive as `1`/`0`, `"yes"`/`"no"`, `"true"`/`"false"` or `null`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|value| match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        _ => false,
    })
}

/// A list of records where malformed entries are dropped.
///
/// An object is read as a keyed collection and its values become the entries.
/// Any other shape reads as an empty list.
pub(crate) fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries: Vec<Value> = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values,
        Some(Value::Object(map)) => map.into_iter().map(|(_, value)| value).collect(),
        _ => Vec::new(),
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed catalog record");
                None
            }
        })
        .collect())
}
