//! Pagination primitives shared by repositories and HTTP responses.

use serde::Serialize;

/// Items returned per page when the caller does not specify a size.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page request forwarded to repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

/// One page of a filtered collection plus total-count metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Wrap a page of items. `total` is the filtered item count, from which
    /// the page count is derived; an empty page is a valid result.
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            items,
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}
