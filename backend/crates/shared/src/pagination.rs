//! Pagination
//!
//! Offset pagination shared by list endpoints.

use serde::{Deserialize, Serialize};

/// Page size used when the caller sends none (or a non-positive one)
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw query parameters, e.g. `?page=2&limit=20`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Normalize: page < 1 becomes 1, limit <= 0 becomes the default,
    /// limit above [`MAX_PAGE_SIZE`] is clamped.
    pub fn new(page: i64, limit: i64) -> Self {
        let page = page.clamp(1, u32::MAX as i64) as u32;
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE as i64) as u32
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

impl From<PageQuery> for PageRequest {
    fn from(q: PageQuery) -> Self {
        Self::new(q.page.unwrap_or(1), q.limit.unwrap_or(DEFAULT_PAGE_SIZE as i64))
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub page: u32,
    pub limit: u32,
    pub total_rows: i64,
    pub total_pages: i64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, total_rows: i64, data: Vec<T>) -> Self {
        let limit = request.limit() as i64;
        let total_pages = if total_rows <= 0 {
            0
        } else {
            (total_rows + limit - 1) / limit
        };
        Self {
            page: request.page(),
            limit: request.limit(),
            total_rows,
            total_pages,
            data,
        }
    }

    /// Convert the items while keeping the totals
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            limit: self.limit,
            total_rows: self.total_rows,
            total_pages: self.total_pages,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_normalization() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);

        let req = PageRequest::new(-3, 500);
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), MAX_PAGE_SIZE);

        let req = PageRequest::new(3, 20);
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest::new(1, 10);
        assert_eq!(Page::new(req, 0, Vec::<u8>::new()).total_pages, 0);
        assert_eq!(Page::new(req, 10, Vec::<u8>::new()).total_pages, 1);
        assert_eq!(Page::new(req, 11, Vec::<u8>::new()).total_pages, 2);
    }

    #[test]
    fn test_from_query() {
        let req: PageRequest = PageQuery { page: None, limit: None }.into();
        assert_eq!(req, PageRequest::default());

        let json = serde_json::to_string(&Page::new(req, 1, vec![7])).unwrap();
        assert!(json.contains(r#""total_rows":1"#));
        assert!(json.contains(r#""data":[7]"#));
    }
}
