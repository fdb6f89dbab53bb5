//! List query parameters and paged results

use serde::Serialize;

/// Narrowing applied before pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only records with `is_active == true`.
    pub active_only: bool,
    /// Case-insensitive substring on the entity's search field.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn active() -> Self {
        Self {
            active_only: true,
            search: None,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            active_only: false,
            search: Some(term.into()),
        }
    }
}

/// Offset pagination + filter; results are ordered by ascending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: u64,
    pub limit: u64,
    pub filter: ListFilter,
}

impl ListQuery {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit,
            filter: ListFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// One page of records; `total` counts matches before pagination.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Escape `%`, `_` and `\` so a search term matches literally under `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
