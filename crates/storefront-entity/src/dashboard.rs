//! Dashboard summary.

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryPage};

/// Headline numbers and recent categories shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Total number of categories in the store.
    pub total_categories: u64,
    /// Sub-categories across the recent categories.
    pub total_subcategories: u64,
    /// Most recent categories.
    pub recent: Vec<Category>,
}

impl From<CategoryPage> for DashboardSummary {
    fn from(page: CategoryPage) -> Self {
        let total_subcategories = page
            .categories
            .iter()
            .map(|c| c.sub_category_count() as u64)
            .sum();
        Self {
            total_categories: page.total_count,
            total_subcategories,
            recent: page.categories,
        }
    }
}
