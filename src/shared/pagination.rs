//! Pagination and include parsing shared by every list endpoint.
//!
//! Query strings look like `?page=2&size=20&include=user,like`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// Comma-separated list of side tables to attach (`user`, `like`)
    pub include: Option<String>,
}

impl PageQuery {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            include: None,
        }
    }

    /// Clamped `(page, size)`: page is 1-based, size is within `1..=MAX_PAGE_SIZE`
    pub fn page_size(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }

    pub fn includes(&self, name: &str) -> bool {
        self.include
            .as_deref()
            .map(|list| list.split(',').any(|item| item.trim() == name))
            .unwrap_or(false)
    }
}

/// Row offset of a 1-based page, saturating at `i64::MAX` for huge pages
pub fn offset(page: i64, size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(size.max(0))
}

/// A page is considered full, and more rows may follow, when it has exactly `size` items
pub fn has_more(len: usize, size: i64) -> bool {
    size > 0 && len as i64 == size
}
