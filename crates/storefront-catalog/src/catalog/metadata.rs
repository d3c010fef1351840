//! Supplementary product metadata.
//!
//! `meta_data` is an open bag authored by CMS plugins. Keys come and go between
//! products, so every accessor here returns an absent value instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const LABEL_KEY: &str = "joice_enovathemes_label1";
const LABEL_COLOR_KEY: &str = "joice_enovathemes_label1_color";
const FEATURES_KEY: &str = "enovathemes_addons_features";
const SHAPES_KEY: &str = "_moissanite_shapes";
const CUSTOM_FIELDS_KEY: &str = "_custom_product_fields";
const SPECIFICATIONS_KEY: &str = "_product_specifications";

/// Badge color used when a label has none of its own.
pub const DEFAULT_LABEL_COLOR: &str = "#D4AF37";

/// A label/value row from the specification table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

/// A color swatch variant authored as a custom field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CustomField {
    pub image: String,
    pub hover_image: String,
    pub color: String,
    pub color_name: String,
    pub price: f64,
}

/// Open-ended product metadata with typed accessors.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(transparent)]
pub struct ProductMeta(Map<String, Value>);

impl ProductMeta {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for a key. Non-string values are absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Promotional badge text (e.g., "New", "Best Seller").
    pub fn label(&self) -> Option<&str> {
        self.non_empty_str(LABEL_KEY)
    }

    /// Badge background color.
    pub fn label_color(&self) -> &str {
        self.non_empty_str(LABEL_COLOR_KEY)
            .unwrap_or(DEFAULT_LABEL_COLOR)
    }

    /// Feature bullet points, one per non-blank line.
    pub fn features(&self) -> Vec<&str> {
        self.non_empty_str(FEATURES_KEY)
            .map(|text| {
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Available stone shapes.
    pub fn shapes(&self) -> Vec<&str> {
        self.array(SHAPES_KEY)
            .filter_map(Value::as_str)
            .collect()
    }

    /// Specification table rows. Malformed rows are skipped.
    pub fn specifications(&self) -> Vec<Specification> {
        self.array(SPECIFICATIONS_KEY)
            .filter_map(|row| Specification::deserialize(row).ok())
            .collect()
    }

    /// Custom color swatches. Malformed entries are skipped.
    pub fn custom_fields(&self) -> Vec<CustomField> {
        self.array(CUSTOM_FIELDS_KEY)
            .filter_map(|row| CustomField::deserialize(row).ok())
            .collect()
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.trim().is_empty())
    }

    fn array(&self, key: &str) -> impl Iterator<Item = &Value> {
        self.get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
    }
}

impl From<Map<String, Value>> for ProductMeta {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<'de> Deserialize<'de> for ProductMeta {
    /// Accepts an object, a `[{"key": .., "value": ..}]` list (the shape the
    /// stock REST API emits) or anything else as empty metadata.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            Value::Array(entries) => entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::Object(mut obj) => {
                        let key = obj.remove("key")?.as_str()?.to_string();
                        let value = obj.remove("value").unwrap_or(Value::Null);
                        Some((key, value))
                    }
                    _ => None,
                })
                .collect(),
            _ => Map::new(),
        };
        Ok(Self(map))
    }
}
