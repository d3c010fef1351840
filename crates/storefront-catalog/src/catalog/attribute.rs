//! Product attributes and the facet axes derived from them.

use super::lenient;
use serde::{Deserialize, Serialize};

/// A filterable attribute axis.
///
/// Attributes are a free-form list upstream. An axis is the small tagged
/// lookup the filter engine uses instead of probing attribute names ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetAxis {
    Color,
    Material,
}

impl FacetAxis {
    /// Every axis, in display order.
    pub const ALL: [FacetAxis; 2] = [FacetAxis::Material, FacetAxis::Color];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetAxis::Color => "color",
            FacetAxis::Material => "material",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FacetAxis::Color => "Color",
            FacetAxis::Material => "Material",
        }
    }

    /// Resolve an attribute name to an axis.
    ///
    /// Names are compared case-insensitively after dropping the `pa_` prefix
    /// the CMS adds to global attributes, so `Color`, `pa_colour` and `metal`
    /// all resolve.
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_lowercase();
        let bare = lowered.strip_prefix("pa_").unwrap_or(&lowered);
        match bare {
            "color" | "colour" => Some(FacetAxis::Color),
            "material" | "metal" => Some(FacetAxis::Material),
            _ => None,
        }
    }
}

/// A named attribute with its option values (e.g., Metal: Gold, Platinum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProductAttribute {
    /// Attribute name as authored (e.g., "pa_metal-type").
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Option values.
    #[serde(default, deserialize_with = "lenient::names")]
    pub options: Vec<String>,
    /// Shown on the product page.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub visible: bool,
    /// Used to build purchasable variations.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub variation: bool,
}

impl ProductAttribute {
    /// Create a visible attribute.
    pub fn new<S: Into<String>>(name: impl Into<String>, options: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
            visible: true,
            variation: false,
        }
    }

    /// The facet axis this attribute feeds, if any.
    pub fn axis(&self) -> Option<FacetAxis> {
        FacetAxis::from_attribute_name(&self.name)
    }

    /// Check for an exact (case-sensitive) option value.
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    /// Human label: `pa_ring-size` becomes `Ring Size`.
    pub fn display_name(&self) -> String {
        let bare = self.name.strip_prefix("pa_").unwrap_or(&self.name);
        bare.split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
