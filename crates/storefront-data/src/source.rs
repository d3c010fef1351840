//! Catalog sources.

use std::path::PathBuf;

use async_trait::async_trait;
use storefront_catalog::catalog::Product;

use crate::error::FetchError;

/// A place the product snapshot can be fetched from.
///
/// One call yields the whole ordered collection or fails. No query parameters
/// are sent; all filtering happens client-side afterwards.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full product collection.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Short description for logs (e.g., the endpoint URL).
    fn describe(&self) -> String;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Box<S> {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_products().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Decode a catalog body: a JSON array of products.
pub fn decode_products(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// In-memory source returning a fixed collection.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} products)", self.products.len())
    }
}

/// Source reading a JSON fixture from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let body = tokio::fs::read(&self.path).await?;
        decode_products(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_products() {
        let products = decode_products(br#"[{"id": 1, "name": "Ring"}, {"id": 2}]"#).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Ring");
    }

    #[test]
    fn test_decode_tolerates_one_sloppy_record() {
        let body = br#"[
            {"id": 1, "name": "Ring", "stock_quantity": "5"},
            {"id": 2, "attributes": {}},
            {"id": 3, "attributes": [{"name": "pa_metal", "options": ["Gold"], "visible": "1"}]}
        ]"#;
        let products = decode_products(body).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].stock_quantity, Some(5));
        assert!(products[2].attributes[0].visible);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode_products(br#"{"products": []}"#),
            Err(FetchError::Deserialization(_))
        ));
        assert!(matches!(
            decode_products(b"<html>maintenance</html>"),
            Err(FetchError::Deserialization(_))
        ));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticCatalogSource::new(vec![Product::new(1, "Ring")]);
        assert_eq!(source.fetch_products().await.unwrap().len(), 1);
        assert_eq!(source.describe(), "static (1 products)");
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 4, "name": "Pendant", "price": "88.00"}}]"#).unwrap();

        let source = FileCatalogSource::new(file.path());
        let products = source.fetch_products().await.unwrap();
        assert_eq!(products[0].id, 4);
    }

    #[tokio::test]
    async fn test_boxed_source() {
        let source: Box<dyn CatalogSource> = Box::new(StaticCatalogSource::new(vec![
            Product::new(1, "Ring"),
            Product::new(2, "Band"),
        ]));
        assert_eq!(source.fetch_products().await.unwrap().len(), 2);
        assert_eq!(source.describe(), "static (2 products)");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileCatalogSource::new("/nonexistent/catalog.json");
        assert!(matches!(source.fetch_products().await, Err(FetchError::Io(_))));
    }
}
