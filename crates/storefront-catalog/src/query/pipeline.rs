//! Catalog query pipeline.
//!
//! Owns the product snapshot and the caller's selection, sort key and page
//! number, and rebuilds the derived view after every mutation:
//!
//! 1. facets from the snapshot
//! 2. filter the snapshot by the selection
//! 3. sort the filtered products
//! 4. clamp the page number into the new page count
//! 5. slice the page
//!
//! Nothing is patched incrementally. A catalog is small enough that a full
//! rebuild is cheap, and it rules out stale derived state.

use crate::catalog::{FacetAxis, Product};
use crate::error::CatalogError;
use crate::price::PriceRange;
use crate::query::{
    extract_facets, filter_products, paginate, sort_products, total_pages, FacetSet,
    FilterSelection, Page, SortKey, DEFAULT_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Products per page.
    pub page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Where the snapshot fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    /// Fetch in flight (or not started). Not the same as an empty catalog.
    Loading,
    /// Snapshot available.
    Ready,
    /// Fetch failed; terminal until the caller retries.
    Failed(String),
}

/// Read-only state handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub facets: FacetSet,
    pub page: Page<Product>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl CatalogView {
    fn pending(state: &LoadState, page_size: usize) -> Self {
        Self {
            facets: FacetSet::default(),
            page: Page::empty(page_size),
            is_loading: *state == LoadState::Loading,
            error: match state {
                LoadState::Failed(message) => Some(message.clone()),
                _ => None,
            },
        }
    }
}

/// Stateful coordinator for one shop view session.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    config: QueryConfig,
    state: LoadState,
    snapshot: Arc<[Product]>,
    facets: FacetSet,
    selection: FilterSelection,
    sort: SortKey,
    page: usize,
    filtered_count: usize,
    view: CatalogView,
}

impl CatalogQuery {
    /// Create a pipeline in the loading state.
    pub fn new(config: QueryConfig) -> Result<Self, CatalogError> {
        if config.page_size == 0 {
            return Err(CatalogError::InvalidPageSize(config.page_size));
        }

        Ok(Self::with_config(config))
    }

    fn with_config(config: QueryConfig) -> Self {
        let state = LoadState::Loading;
        Self {
            view: CatalogView::pending(&state, config.page_size),
            config,
            state,
            snapshot: Arc::from(Vec::new()),
            facets: FacetSet::default(),
            selection: FilterSelection::default(),
            sort: SortKey::default(),
            page: 1,
            filtered_count: 0,
        }
    }

    // ---- load lifecycle ----

    /// Mark a (re)fetch as in flight.
    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
        self.recompute();
    }

    /// Install a freshly fetched snapshot, replacing any previous one.
    pub fn resolve(&mut self, products: Vec<Product>) {
        let mut seen = HashSet::with_capacity(products.len());
        let duplicates = products.iter().filter(|p| !seen.insert(p.id)).count();
        if duplicates > 0 {
            tracing::warn!(duplicates, "catalog snapshot contains duplicate product ids");
        }

        tracing::info!(products = products.len(), "catalog snapshot resolved");
        self.snapshot = Arc::from(products);
        self.facets = extract_facets(&self.snapshot);
        self.state = LoadState::Ready;
        self.recompute();
    }

    /// Record a failed fetch. No partial catalog is kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "catalog fetch failed");
        self.snapshot = Arc::from(Vec::new());
        self.facets = FacetSet::default();
        self.state = LoadState::Failed(message);
        self.recompute();
    }

    // ---- mutations ----

    /// Set or clear the category filter.
    pub fn set_category(&mut self, category: Option<String>) {
        self.selection.category = category;
        self.recompute();
    }

    /// Set or clear the price range.
    pub fn set_price_range(&mut self, range: Option<PriceRange>) {
        self.selection.price_range = range;
        self.recompute();
    }

    /// Flip a color option. Returns whether it is now selected.
    pub fn toggle_color(&mut self, color: &str) -> bool {
        self.toggle(FacetAxis::Color, color)
    }

    /// Flip a material option. Returns whether it is now selected.
    pub fn toggle_material(&mut self, material: &str) -> bool {
        self.toggle(FacetAxis::Material, material)
    }

    fn toggle(&mut self, axis: FacetAxis, value: &str) -> bool {
        let selected = self.selection.toggle(axis, value);
        self.recompute();
        selected
    }

    /// Replace the whole selection.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.recompute();
    }

    /// Change the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.recompute();
    }

    /// Request a page. Out-of-range requests are clamped.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.recompute();
    }

    /// Step forward one page if there is one.
    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    /// Step back one page if there is one.
    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Clear every filter and return to the first page. The sort key stays.
    pub fn reset_filters(&mut self) {
        self.selection.clear();
        self.page = 1;
        self.recompute();
    }

    // ---- derived state ----

    fn recompute(&mut self) {
        let page_size = self.config.page_size;

        if self.state != LoadState::Ready {
            self.filtered_count = 0;
            self.view = CatalogView::pending(&self.state, page_size);
            return;
        }

        let filtered = filter_products(self.snapshot.iter(), &self.selection);
        let sorted = sort_products(filtered, self.sort);
        self.filtered_count = sorted.len();

        let pages = total_pages(sorted.len(), page_size);
        self.page = self.page.clamp(1, pages);

        let page = match paginate(&sorted, page_size, self.page) {
            Ok(page) => page.map(Product::clone),
            Err(err) => {
                tracing::error!(error = %err, "pagination rejected a clamped page");
                Page::empty(page_size)
            }
        };

        tracing::debug!(
            total = self.snapshot.len(),
            filtered = self.filtered_count,
            page = self.page,
            pages,
            sort = %self.sort,
            "catalog view recomputed"
        );

        self.view = CatalogView {
            facets: self.facets.clone(),
            page,
            is_loading: false,
            error: None,
        };
    }

    /// The current derived view.
    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current page after clamping.
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Number of products matching the selection.
    pub fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    /// The full snapshot in source order. Empty unless ready.
    pub fn snapshot(&self) -> &[Product] {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Loaded without error, but nothing matches the selection.
    ///
    /// Drives the "no products found" affordance, distinct from both the
    /// loading and the error state.
    pub fn is_empty_result(&self) -> bool {
        self.state == LoadState::Ready && self.filtered_count == 0
    }

    /// Look up a product by slug (detail view). An empty slug never matches.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        if slug.is_empty() {
            return None;
        }
        self.snapshot.iter().find(|p| p.slug == slug)
    }

    /// Look up a product by id.
    pub fn find_by_id(&self, id: u64) -> Option<&Product> {
        self.snapshot.iter().find(|p| p.id == id)
    }

    /// First `limit` products of a category in source order, for tab strips.
    ///
    /// `None` previews the whole catalog. Independent of the active selection.
    pub fn preview(&self, category: Option<&str>, limit: usize) -> Vec<&Product> {
        self.snapshot
            .iter()
            .filter(|p| category.map_or(true, |c| p.has_category(c)))
            .take(limit)
            .collect()
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::with_config(QueryConfig::default())
    }
}
