//! Pagination over an ordered listing.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Products per page in the shop grid.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Number of pages needed for `total` items. Never less than one.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if total == 0 || per_page == 0 {
        1
    } else {
        total.div_ceil(per_page)
    }
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = total_pages(total, per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.per_page
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7] around page 5).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(1, per_page, 0),
        }
    }

    /// Check if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Convert the items, keeping pagination.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slice an ordered listing into one page.
///
/// `page_number` must lie in `1..=total_pages`; an out-of-range page is a
/// caller bug (typically a stale page number surviving a filter change) and is
/// reported, never clamped.
pub fn paginate<T: Clone>(
    items: &[T],
    page_size: usize,
    page_number: usize,
) -> Result<Page<T>, CatalogError> {
    if page_size == 0 {
        return Err(CatalogError::InvalidPageSize(page_size));
    }

    let pagination = Pagination::new(page_number, page_size, items.len());
    if page_number < 1 || page_number > pagination.total_pages {
        return Err(CatalogError::PageOutOfRange {
            page: page_number,
            total_pages: pagination.total_pages,
        });
    }

    let start = pagination.offset();
    let end = (start + page_size).min(items.len());

    Ok(Page {
        items: items[start..end].to_vec(),
        pagination,
    })
}
