//! Category search parameters and results.

use serde::{Deserialize, Serialize};

use storefront_core::types::PageRequest;

use super::model::Category;

/// Parameters of a category search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuery {
    /// Requested page.
    pub page: PageRequest,
    /// Name filter; `None` or blank lists everything.
    pub search_term: Option<String>,
}

impl CategoryQuery {
    /// Query one page without a filter.
    pub fn page(page: u64, size: u64) -> Self {
        Self {
            page: PageRequest::new(page, size),
            search_term: None,
        }
    }

    /// Add a name filter.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// The filter term, if one is set and not blank.
    pub fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    /// Categories on this page.
    pub categories: Vec<Category>,
    /// Total matches across all pages.
    pub total_count: u64,
    /// Number of pages at the requested size.
    pub page_count: u64,
}
