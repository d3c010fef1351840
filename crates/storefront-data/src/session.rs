//! Session loading: one fetch, one snapshot, caller-driven retries.

use storefront_catalog::query::{CatalogQuery, CatalogView, QueryConfig};
use storefront_catalog::CatalogError;

use crate::error::FetchError;
use crate::source::CatalogSource;

/// A shop view session: a source plus the query pipeline it feeds.
///
/// The snapshot is fetched once by [`load`](Self::load). A failure leaves the
/// pipeline in its error state until the caller invokes
/// [`reload`](Self::reload), which fetches from scratch and replaces the
/// snapshot wholesale.
pub struct CatalogSession<S> {
    source: S,
    query: CatalogQuery,
}

impl<S: CatalogSource> CatalogSession<S> {
    /// Create a session. The pipeline starts in the loading state.
    pub fn new(source: S, config: QueryConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            source,
            query: CatalogQuery::new(config)?,
        })
    }

    /// Fetch the snapshot and install it, or record the failure.
    ///
    /// The error is returned as well as recorded so callers can log or
    /// surface it; the pipeline already reflects it either way.
    pub async fn load(&mut self) -> Result<&CatalogView, FetchError> {
        tracing::info!(source = %self.source.describe(), "loading catalog");
        self.query.begin_loading();

        match self.source.fetch_products().await {
            Ok(products) => {
                self.query.resolve(products);
                Ok(self.query.view())
            }
            Err(err) => {
                self.query.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Caller-initiated retry.
    pub async fn reload(&mut self) -> Result<&CatalogView, FetchError> {
        self.load().await
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Mutable access for filter/sort/page changes.
    pub fn query_mut(&mut self) -> &mut CatalogQuery {
        &mut self.query
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_query(self) -> CatalogQuery {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticCatalogSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_catalog::catalog::Product;

    /// Fails the first `failures` fetches, then serves two products.
    struct FlakySource {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FlakySource {
        async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(FetchError::Http {
                    status: 503,
                    url: "https://shop.example.com/products".to_string(),
                })
            } else {
                Ok(vec![Product::new(1, "Ring"), Product::new(2, "Band")])
            }
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[tokio::test]
    async fn test_load_resolves_snapshot() {
        let source = StaticCatalogSource::new(vec![Product::new(1, "Ring").with_category("Rings")]);
        let mut session = CatalogSession::new(source, QueryConfig::default()).unwrap();
        assert!(session.query().is_loading());

        let view = session.load().await.unwrap();
        assert!(!view.is_loading);
        assert_eq!(view.page.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let source = FlakySource {
            failures: 1,
            calls: AtomicUsize::new(0),
        };
        let mut session = CatalogSession::new(source, QueryConfig::default()).unwrap();

        let err = session.load().await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 503, .. }));
        assert!(session.query().error().unwrap().contains("503"));
        assert!(session.query().snapshot().is_empty());
        assert!(!session.query().is_empty_result());

        let view = session.reload().await.unwrap();
        assert_eq!(view.error, None);
        assert_eq!(view.page.pagination.total, 2);
        assert_eq!(session.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_mutations_after_load() {
        let source = StaticCatalogSource::new(
            (1..=30).map(|id| Product::new(id, format!("Item {}", id))).collect(),
        );
        let mut session = CatalogSession::new(source, QueryConfig { page_size: 10 }).unwrap();
        session.load().await.unwrap();

        session.query_mut().set_page(3);
        assert_eq!(session.query().view().page.items[0].id, 21);

        let query = session.into_query();
        assert_eq!(query.filtered_count(), 30);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let source = StaticCatalogSource::default();
        assert!(CatalogSession::new(source, QueryConfig { page_size: 0 }).is_err());
    }
}
