//! Dashboard summary built from the first page of categories.

use storefront_core::result::AppResult;
use storefront_entity::category::CategoryQuery;
use storefront_entity::dashboard::DashboardSummary;

use crate::categories::CategoryApi;

/// Loads the dashboard headline numbers.
#[derive(Debug, Clone)]
pub struct DashboardService {
    categories: CategoryApi,
    recent: u64,
}

impl DashboardService {
    /// Show `recent` categories on the dashboard.
    pub fn new(categories: CategoryApi, recent: u64) -> Self {
        Self { categories, recent }
    }

    /// Fetch the first page and summarize it.
    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        let page = self
            .categories
            .search(&CategoryQuery::page(0, self.recent))
            .await?;
        Ok(DashboardSummary::from(page))
    }
}
