// Pagination types shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Position of a cached page within the server's full result set.
///
/// `page` is 1-indexed. A `total` of zero always implies `total_pages == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Build a pagination state, forcing `total_pages` to zero when the
    /// result set is empty.
    pub fn new(page: u32, limit: u32, total: u64, total_pages: u32) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: if total == 0 { 0 } else { total_pages },
        }
    }

    /// A single page holding every item of an unpaginated listing.
    pub fn single(len: usize) -> Self {
        let total = u64::try_from(len).unwrap_or(u64::MAX);
        let limit = u32::try_from(len).unwrap_or(u32::MAX);
        Self::new(Self::DEFAULT_PAGE, limit, total, 1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT, 0, 0)
    }
}

/// One page of a server collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap an unpaginated listing as a single page.
    pub fn single(items: Vec<T>) -> Self {
        let pagination = Pagination::single(items.len());
        Self { items, pagination }
    }
}

/// Pagination fields of a listing body. The item array sits next to them
/// under an entity-specific key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Plain `page` / `limit` query parameters. Unset values are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Append `page` and `limit` to a query parameter list.
    pub fn extend_params(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
    }
}
