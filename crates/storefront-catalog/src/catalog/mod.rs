//! Product catalog module.
//!
//! Contains the product record as the catalog API ships it, its attribute
//! facets and the open-ended metadata bag.

mod attribute;
mod lenient;
mod metadata;
mod product;

pub use attribute::{FacetAxis, ProductAttribute};
pub use metadata::{CustomField, ProductMeta, Specification};
pub use product::{Product, StockStatus};
