//! List query: raw request parameters in, normalized page + filter list out.
//!
//! Bad filter input never fails the request. Pagination values are clamped,
//! an out-of-range or unparsable `year` is dropped, blank strings are no-ops.

use super::model::{max_year, MIN_YEAR};
use crate::shared::PageParams;

/// Raw list parameters exactly as they arrived on the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub q: Option<String>,
}

/// One predicate fragment. Fragments are independent and AND-ed together by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    /// Case-insensitive exact match on genre.
    Genre(String),
    /// Exact release year.
    Year(i32),
    /// Case-insensitive literal substring of title OR director.
    Search(String),
}

/// The filters that were actually applied, with trimmed values as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedFilters {
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub q: Option<String>,
}

/// Normalized, immutable list request. Built once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: PageParams,
    pub filters: Vec<MovieFilter>,
}

impl ListQuery {
    pub fn from_params(params: &ListParams, current_year: i32) -> Self {
        let page = PageParams::normalize(params.page.as_deref(), params.per_page.as_deref());

        let filters = [
            non_blank(params.genre.as_deref()).map(|g| MovieFilter::Genre(g.to_string())),
            params
                .year
                .as_deref()
                .and_then(|y| parse_year(y, current_year))
                .map(MovieFilter::Year),
            non_blank(params.q.as_deref()).map(|q| MovieFilter::Search(q.to_string())),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self { page, filters }
    }

    /// Summary for clients. Derived from `filters`, so ignored input never shows up.
    pub fn applied(&self) -> AppliedFilters {
        self.filters
            .iter()
            .fold(AppliedFilters::default(), |mut acc, f| {
                match f {
                    MovieFilter::Genre(g) => acc.genre = Some(g.clone()),
                    MovieFilter::Year(y) => acc.year = Some(*y),
                    MovieFilter::Search(q) => acc.q = Some(q.clone()),
                }
                acc
            })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_year(raw: &str, current_year: i32) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (MIN_YEAR..=max_year(current_year)).contains(y))
}

// ── Tests ──────────────────────────────────────────────────────
