//! Page normalization and page arithmetic shared by every list endpoint.

use std::num::IntErrorKind;

/// `per_page` used when the client sends nothing, garbage, or a value below 1.
pub const DEFAULT_PER_PAGE: u64 = 20;
/// Hard ceiling on `per_page`; bounds response size and query cost.
pub const MAX_PER_PAGE: u64 = 100;

/// Validated pagination input. Every raw input maps to a legal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageParams {
    /// Normalize raw `page` / `per_page` query values.
    ///
    /// - `page`: non-positive or unparsable → 1, no upper bound.
    /// - `per_page`: below 1 or unparsable → [`DEFAULT_PER_PAGE`],
    ///   above [`MAX_PER_PAGE`] → [`MAX_PER_PAGE`].
    pub fn normalize(page: Option<&str>, per_page: Option<&str>) -> Self {
        let page = match page.and_then(parse_int) {
            Some(n) if n >= 1 => n as u64,
            _ => 1,
        };

        let per_page = match per_page.and_then(parse_int) {
            Some(n) if n < 1 => DEFAULT_PER_PAGE,
            Some(n) if n as u64 > MAX_PER_PAGE => MAX_PER_PAGE,
            Some(n) => n as u64,
            None => DEFAULT_PER_PAGE,
        };

        Self { page, per_page }
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Parse a signed integer; digit strings that overflow saturate instead of failing.
fn parse_int(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// One page of results plus the numbers a client needs to navigate.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    /// Rows matching the filters, ignoring pagination.
    pub total_count: u64,
    /// The requested page, even when it lies beyond `total_pages`.
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: PageParams) -> Self {
        let total_pages = total_count.div_ceil(params.per_page);
        Self {
            items,
            total_count,
            page: params.page,
            per_page: params.per_page,
            total_pages,
        }
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
