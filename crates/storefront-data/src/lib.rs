//! Catalog fetch boundary.
//!
//! This crate provides:
//! - `CatalogSource` - Single-shot async fetch of the product snapshot
//! - `HttpCatalogSource` - `GET` against the catalog endpoint
//! - `FileCatalogSource` / `StaticCatalogSource` - Fixtures and offline use
//! - `CatalogSession` - Drives a `CatalogQuery` through loading, ready and failed

mod error;
mod http;
mod session;
mod source;

pub use error::*;
pub use http::*;
pub use session::*;
pub use source::*;
