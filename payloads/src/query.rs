//! Parameters and results of paginated list endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page size used when a screen does not pick its own.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Filters, search text and page window for a list endpoint.
///
/// `page` and `limit` are always at least 1; the setters clamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub filters: BTreeMap<String, String>,
    pub search: String,
    page: u32,
    limit: u32,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            search: String::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryParameters {
    pub fn new(page: u32, limit: u32) -> Self {
        Self::default().page(page).limit(limit)
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn filter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.limit
    }

    /// Apply one-shot overrides key by key, returning the effective
    /// parameters for a single request.
    pub fn merged(&self, overrides: &QueryOverrides) -> Self {
        let mut merged = self.clone();
        if let Some(page) = overrides.page {
            merged = merged.page(page);
        }
        if let Some(limit) = overrides.limit {
            merged = merged.limit(limit);
        }
        if let Some(search) = &overrides.search {
            merged.search = search.clone();
        }
        for (key, value) in &overrides.filters {
            merged.filters.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Query pairs in wire order: `page`, `limit`, `search` when present,
    /// then every filter with a non-empty value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs.extend(
            self.filters
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }
}

/// Per-call adjustments layered over a hook's parameters by `refetch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOverrides {
    pub filters: BTreeMap<String, String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl QueryOverrides {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn filter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Totals reported by the server alongside a page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
}

/// One page of a list endpoint, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}
