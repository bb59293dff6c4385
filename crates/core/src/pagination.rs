//! Page/page-size normalization for list endpoints.

/// Page size used when none (or an out-of-range one) is requested.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized, 1-based page request.
///
/// Construct through [`Pagination::new`]; the fields always satisfy
/// `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    page_size: i64,
}

impl Pagination {
    /// Normalize user-supplied paging values.
    ///
    /// - `page` unset or `<= 0` becomes `1`.
    /// - `page_size` unset, `<= 0`, or above [`MAX_PAGE_SIZE`] becomes
    ///   [`DEFAULT_PAGE_SIZE`] (it is reset, not capped).
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p > 0 => p,
            _ => 1,
        };
        let page_size = match page_size {
            Some(s) if s > 0 && s <= MAX_PAGE_SIZE => s,
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// SQL `OFFSET`: `(page - 1) * page_size`, saturating for absurd pages.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
