//! Client-side catalog query engine for the storefront.
//!
//! A product collection is fetched once per session and held as an immutable
//! snapshot. Everything the shop view shows is derived from that snapshot:
//!
//! - **Catalog**: Product records, attributes, metadata
//! - **Price**: Lenient parsing of the decimal price strings the catalog API returns
//! - **Query**: Facet extraction, filtering, sorting, pagination and the
//!   [`CatalogQuery`](query::CatalogQuery) pipeline that composes them
//!
//! # Example
//!
//! ```rust
//! use storefront_catalog::prelude::*;
//!
//! let mut query = CatalogQuery::default();
//! query.resolve(vec![
//!     Product::new(1, "Solitaire Ring").with_price("1200.00").with_category("Rings"),
//!     Product::new(2, "Tennis Bracelet").with_price("850.00").with_category("Bracelets"),
//! ]);
//!
//! query.set_category(Some("Rings".to_string()));
//! query.set_sort(SortKey::PriceAscending);
//!
//! let view = query.view();
//! assert_eq!(view.page.pagination.total, 1);
//! assert_eq!(view.facets.categories.len(), 2);
//! ```

pub mod error;
pub mod price;

pub mod catalog;
pub mod query;

pub use error::CatalogError;
pub use price::{Price, PriceBounds, PriceRange};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::price::{Price, PriceBounds, PriceRange};

    // Catalog
    pub use crate::catalog::{
        CustomField, FacetAxis, Product, ProductAttribute, ProductMeta, Specification,
        StockStatus,
    };

    // Query
    pub use crate::query::{
        extract_facets, filter_products, matches, paginate, sort_products, CatalogQuery,
        CatalogView, FacetSet, FacetValue, FilterSelection, LoadState, Page, Pagination,
        QueryConfig, SortKey,
    };
}
