//! Catalog error types.

use crate::price::Price;
use thiserror::Error;

/// Errors raised by the catalog query engine.
///
/// None of these describe bad catalog data. Unparseable prices and unknown
/// stock statuses are tolerated where they occur; these variants are caller
/// contract violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Requested page lies outside `1..=total_pages`.
    #[error("Page {page} out of range (1..={total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    /// Page size must be at least one.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Lower price bound above the upper bound.
    #[error("Invalid price range: {lo} > {hi}")]
    InvalidPriceRange { lo: Price, hi: Price },

    /// Sort key name not recognized.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}
