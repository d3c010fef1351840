//! Query module.
//!
//! Facet extraction, filtering, sorting and pagination over a product
//! snapshot, plus the pipeline that composes them for a shop view.

mod facets;
mod filter;
mod pagination;
mod pipeline;
mod sort;

pub use facets::{extract_facets, FacetSet, FacetValue};
pub use filter::{filter_products, matches, FilterSelection};
pub use pagination::{paginate, total_pages, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use pipeline::{CatalogQuery, CatalogView, LoadState, QueryConfig};
pub use sort::{sort_products, SortKey};
