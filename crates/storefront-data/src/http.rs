//! HTTP catalog source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storefront_catalog::catalog::Product;

use crate::error::FetchError;
use crate::source::{decode_products, CatalogSource};

/// Endpoint used when no configuration is given.
pub const DEFAULT_ENDPOINT: &str = "https://shop.example.com/wp-json/custom/v1/products";

/// HTTP source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSourceConfig {
    /// Catalog endpoint returning a JSON array of products.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl HttpSourceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Fetches the catalog with a single `GET`.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    endpoint: String,
}

impl HttpCatalogSource {
    /// Create a source from configuration.
    pub fn new(config: &HttpSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        tracing::info!(endpoint = %self.endpoint, "fetching catalog");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        decode_response(status, &self.endpoint, &body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Turn a raw response into a product collection.
///
/// Any non-2xx status fails regardless of body.
pub fn decode_response(status: u16, url: &str, body: &[u8]) -> Result<Vec<Product>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            status,
            url: url.to_string(),
        });
    }

    let products = decode_products(body)?;
    tracing::debug!(products = products.len(), bytes = body.len(), "catalog body decoded");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://shop.example.com/products";

    #[test]
    fn test_success_body() {
        let products = decode_response(200, URL, br#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn test_non_success_status_fails() {
        for status in [301, 404, 500, 503] {
            let err = decode_response(status, URL, b"[]").unwrap_err();
            assert!(matches!(err, FetchError::Http { status: s, .. } if s == status));
        }
    }

    #[test]
    fn test_malformed_body_fails() {
        let err = decode_response(200, URL, b"{\"error\": true}").unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(decode_response(204, URL, b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let config: HttpSourceConfig =
            serde_json::from_str(r#"{"endpoint": "http://localhost:9000/products"}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://localhost:9000/products");

        let source = HttpCatalogSource::new(&config.with_timeout(5)).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:9000/products");
    }

    #[test]
    fn test_config_new() {
        let config = HttpSourceConfig::new(URL).with_timeout(10);
        assert_eq!(config.endpoint, URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
