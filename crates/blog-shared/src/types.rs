//! Common types

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Row identifier shared by every persisted entity (auto-increment key).
pub type EntityId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    /// Builds a pagination window from optional query parameters.
    /// Zero or missing values fall back to the defaults; page size is capped.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

/// Pagination block returned alongside list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub pages: u64,
}

impl PageInfo {
    pub fn new(total: u64, pagination: &Pagination) -> Self {
        let size = u64::from(pagination.page_size.max(1));
        Self {
            total,
            page: pagination.page,
            pages: total.div_ceil(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_cap() {
        let p = Pagination::new(None, None);
        assert_eq!(p, Pagination { page: 1, page_size: DEFAULT_PAGE_SIZE });

        let p = Pagination::new(Some(0), Some(1000));
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination::new(Some(3), Some(6));
        assert_eq!(p.offset(), 12);
        assert_eq!(p.limit(), 6);
    }

    #[test]
    fn test_page_info_rounds_up() {
        let p = Pagination::new(Some(1), Some(6));
        assert_eq!(PageInfo::new(13, &p).pages, 3);
        assert_eq!(PageInfo::new(12, &p).pages, 2);
        assert_eq!(PageInfo::new(0, &p).pages, 0);
    }
}
