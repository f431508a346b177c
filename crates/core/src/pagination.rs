//! Pagination request and response contract.
//!
//! Every list endpoint takes `page` (1-based) and `perpage` query parameters
//! and answers with a [`Page`]. The decoder accepts both the flat
//! `{ items, total, page, pageSize }` shape and the nested
//! `{ items, pagination: { total, page, perpage } }` shape, and rejects pages
//! that break the size invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client will ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size.
pub const PER_PAGE_PARAM: &str = "perpage";

/// A request for one page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a page request. `page` is clamped to at least 1 and `per_page`
    /// to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// First page with the given size.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Same size, different page.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.per_page)
    }

    /// Query string pairs in wire order.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            (PAGE_PARAM, self.page.to_string()),
            (PER_PAGE_PARAM, self.per_page.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Reasons a decoded page is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    /// A pagination field was absent from both the flat and nested shapes.
    #[error("page is missing `{0}`")]
    MissingField(&'static str),
    /// `page` was 0.
    #[error("page numbers start at 1")]
    PageOutOfRange,
    /// `pageSize` was 0.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// More items than `pageSize`.
    #[error("page holds {items} items but page size is {page_size}")]
    Overfull {
        /// Number of items received.
        items: usize,
        /// Declared page size.
        page_size: u32,
    },
    /// `total` smaller than the number of items on this page.
    #[error("total {total} is smaller than the {items} items on the page")]
    TotalTooSmall {
        /// Declared total.
        total: u64,
        /// Number of items received.
        items: usize,
    },
}

/// One page of a server-side collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPage<T>")]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    page: u32,
    page_size: u32,
}

impl<T> Page<T> {
    /// Build a page, checking the size invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] if `page == 0`, `page_size == 0`,
    /// `items.len() > page_size` or `total < items.len()`.
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::PageOutOfRange);
        }
        if page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        if items.len() > page_size as usize {
            return Err(PageError::Overfull {
                items: items.len(),
                page_size,
            });
        }
        if total < items.len() as u64 {
            return Err(PageError::TotalTooSmall {
                total,
                items: items.len(),
            });
        }
        Ok(Self {
            items,
            total,
            page,
            page_size,
        })
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Size of the whole collection.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size the server used.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// `ceil(total / page_size)`, at least 1.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size)).max(1)
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    items: Vec<T>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default, alias = "perpage", alias = "perPage")]
    page_size: Option<u32>,
    #[serde(default)]
    pagination: Option<PaginationInfo>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PaginationInfo {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default, alias = "perpage", alias = "perPage")]
    page_size: Option<u32>,
}

impl<T> TryFrom<RawPage<T>> for Page<T> {
    type Error = PageError;

    fn try_from(raw: RawPage<T>) -> Result<Self, Self::Error> {
        let nested = raw.pagination.unwrap_or_default();
        let total = raw
            .total
            .or(nested.total)
            .ok_or(PageError::MissingField("total"))?;
        let page = raw
            .page
            .or(nested.page)
            .ok_or(PageError::MissingField("page"))?;
        let page_size = raw
            .page_size
            .or(nested.page_size)
            .ok_or(PageError::MissingField("pageSize"))?;
        Self::new(raw.items, total, page, page_size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_request_clamps() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.per_page(), 1);

        let req = PageRequest::new(3, 10_000);
        assert_eq!(req.per_page(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_request_query_pairs() {
        let pairs = PageRequest::new(2, 10).query_pairs();
        assert_eq!(
            pairs,
            [("page", "2".to_string()), ("perpage", "10".to_string())]
        );
    }

    #[test]
    fn test_decode_flat_shape() {
        let page: Page<u32> = serde_json::from_value(
            json!({"items": [1, 2], "total": 12, "page": 1, "pageSize": 10}),
        )
        .unwrap();
        assert_eq!(page.items(), &[1, 2]);
        assert_eq!(page.total(), 12);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_decode_nested_shape() {
        let page: Page<u32> = serde_json::from_value(json!({
            "items": [5],
            "pagination": {"total": 21, "page": 3, "perpage": 10}
        }))
        .unwrap();
        assert_eq!(page.page(), 3);
        assert_eq!(page.page_size(), 10);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_decode_rejects_overfull_page() {
        let result: Result<Page<u32>, _> = serde_json::from_value(
            json!({"items": [1, 2, 3], "total": 3, "page": 1, "pageSize": 2}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_page_zero() {
        let result: Result<Page<u32>, _> =
            serde_json::from_value(json!({"items": [], "total": 0, "page": 0, "pageSize": 10}));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let result: Result<Page<u32>, _> = serde_json::from_value(json!({"items": []}));
        assert!(result.unwrap_err().to_string().contains("total"));
    }

    #[test]
    fn test_new_rejects_small_total() {
        assert_eq!(
            Page::new(vec![1, 2], 1, 1, 10),
            Err(PageError::TotalTooSmall { total: 1, items: 2 })
        );
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let page: Page<u32> = Page::new(vec![], 0, 1, 10).unwrap();
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_serialize_is_flat() {
        let page = Page::new(vec!["a"], 1, 1, 10).unwrap();
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"items": ["a"], "total": 1, "page": 1, "pageSize": 10})
        );
    }
}
