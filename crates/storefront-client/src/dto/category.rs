//! Category endpoint request and response bodies.

use serde::{Deserialize, Serialize};

use storefront_core::types::{PageRequest, page_count};
use storefront_entity::category::{Category, CategoryPage, CategoryQuery};

/// One search criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    /// Field to match.
    pub key: &'static str,
    /// Value to match.
    pub value: String,
}

/// Body of the category search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Criteria; empty lists everything.
    pub request: Vec<SearchFilter>,
    /// Requested page.
    #[serde(rename = "pageRequest")]
    pub page_request: PageRequest,
}

impl From<&CategoryQuery> for SearchRequest {
    fn from(query: &CategoryQuery) -> Self {
        Self {
            request: query
                .term()
                .map(|value| SearchFilter {
                    key: "name",
                    value: value.to_string(),
                })
                .into_iter()
                .collect(),
            page_request: query.page,
        }
    }
}

/// Paging metadata of a search reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResponse {
    /// Total matches.
    #[serde(default)]
    pub total: u64,
}

/// Reply of the category search call.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Categories on this page.
    #[serde(default)]
    pub response: Option<Vec<Category>>,
    /// Paging metadata.
    #[serde(default)]
    pub page_response: Option<PageResponse>,
}

impl SearchResponse {
    /// Convert into a page, computing the page count at `size`.
    pub fn into_page(self, size: u64) -> CategoryPage {
        let total_count = self.page_response.map(|p| p.total).unwrap_or_default();
        CategoryPage {
            categories: self.response.unwrap_or_default(),
            total_count,
            page_count: page_count(total_count, size),
        }
    }
}

/// Reply wrapping a single category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEnvelope {
    /// The category, when the endpoint returns one.
    #[serde(default)]
    pub category: Option<Category>,
}
