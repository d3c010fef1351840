//! Product record as served by the catalog API.

use super::attribute::{FacetAxis, ProductAttribute};
use super::lenient;
use super::metadata::ProductMeta;
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// Text shown in place of a price that is missing, zero or unparseable.
pub const PRICE_ON_REQUEST: &str = "Price on request";

/// Stock status of a product.
///
/// Only the known statuses are matched; anything else is kept verbatim and
/// displays as out of stock. Stock status never removes a product from the
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnBackorder,
    /// Unrecognized status as sent by the API.
    Other(String),
}

impl StockStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::OnBackorder => "on_backorder",
            StockStatus::Other(raw) => raw,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OnBackorder => "On Backorder",
            StockStatus::OutOfStock | StockStatus::Other(_) => "Out of Stock",
        }
    }

    /// Check if the product can be shown as in stock.
    pub fn is_in_stock(&self) -> bool {
        matches!(self, StockStatus::InStock)
    }
}

impl Default for StockStatus {
    fn default() -> Self {
        StockStatus::Other(String::new())
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        match raw.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "instock" => StockStatus::InStock,
            "outofstock" => StockStatus::OutOfStock,
            "onbackorder" => StockStatus::OnBackorder,
            _ => StockStatus::Other(raw),
        }
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Status strings may also arrive as `null` or a number.
fn stock_status<'de, D>(deserializer: D) -> Result<StockStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient::string(deserializer).map(StockStatus::from)
}

/// A product in the catalog.
///
/// Only `id` is required on the wire. Every other field defaults when absent
/// and unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier, unique within one fetched collection.
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// URL-friendly slug used by the detail view.
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: String,
    /// Upstream product type (e.g., "simple", "variable").
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub product_type: String,
    /// Current price as a decimal string.
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: String,
    #[serde(default, alias = "regularPrice", deserialize_with = "lenient::string")]
    pub regular_price: String,
    #[serde(default, alias = "salePrice", deserialize_with = "lenient::string")]
    pub sale_price: String,
    #[serde(default, alias = "stockStatus", deserialize_with = "stock_status")]
    pub stock_status: StockStatus,
    #[serde(default, alias = "stockQuantity", deserialize_with = "lenient::integer")]
    pub stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, alias = "shortDescription", deserialize_with = "lenient::string")]
    pub short_description: String,
    /// Category names, in authored order.
    #[serde(default, deserialize_with = "lenient::names")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::names")]
    pub tags: Vec<String>,
    /// Image references. May be empty; the renderer substitutes a placeholder.
    #[serde(default, deserialize_with = "lenient::images")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default, alias = "metaData")]
    pub meta_data: ProductMeta,
}

impl Product {
    /// Create a product with only an id and a name.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: String::new(),
            product_type: String::new(),
            price: String::new(),
            regular_price: String::new(),
            sale_price: String::new(),
            stock_status: StockStatus::InStock,
            stock_quantity: None,
            sku: String::new(),
            description: String::new(),
            short_description: String::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            images: Vec::new(),
            attributes: Vec::new(),
            meta_data: ProductMeta::new(),
        }
    }

    /// Set the raw price string.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Add a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.add_category(category);
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: ProductAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Set the stock status.
    pub fn with_stock_status(mut self, status: StockStatus) -> Self {
        self.stock_status = status;
        self
    }

    /// Add a category to this product.
    pub fn add_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    /// Parsed current price.
    pub fn parsed_price(&self) -> Option<Price> {
        Price::parse(&self.price)
    }

    /// Parsed regular (pre-sale) price.
    pub fn parsed_regular_price(&self) -> Option<Price> {
        Price::parse(&self.regular_price)
    }

    /// Parsed sale price.
    pub fn parsed_sale_price(&self) -> Option<Price> {
        Price::parse(&self.sale_price)
    }

    /// Check if the product is in a category (exact match).
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Check if the product can be shown as in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock_status.is_in_stock()
    }

    /// Check if the product is on sale (sale price parses and undercuts the regular price).
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price().is_some()
    }

    /// The struck-through regular price to show next to a sale price.
    pub fn compare_at_price(&self) -> Option<Price> {
        match (self.parsed_regular_price(), self.parsed_sale_price()) {
            (Some(regular), Some(sale)) if sale < regular => Some(regular),
            _ => None,
        }
    }

    /// Price label for cards: the formatted price, or "Price on request".
    pub fn display_price(&self) -> String {
        self.display_price_with("$")
    }

    /// Price label with an explicit currency symbol.
    pub fn display_price_with(&self, symbol: &str) -> String {
        match self.parsed_price() {
            Some(price) if !price.is_zero() => price.display_with(symbol),
            _ => PRICE_ON_REQUEST.to_string(),
        }
    }

    /// First image reference, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Attributes flagged visible on the product page.
    pub fn visible_attributes(&self) -> impl Iterator<Item = &ProductAttribute> {
        self.attributes.iter().filter(|a| a.visible)
    }

    /// Option values this product exposes on a facet axis.
    ///
    /// Empty when no attribute maps to the axis.
    pub fn axis_options(&self, axis: FacetAxis) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(move |a| a.axis() == Some(axis))
            .flat_map(|a| a.options.iter().map(String::as_str))
    }
}
