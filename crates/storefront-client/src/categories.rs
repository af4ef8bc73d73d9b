//! Store-scoped category endpoints.

use tracing::{debug, info, warn};

use storefront_core::config::ApiConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_entity::category::{Category, CategoryDraft, CategoryPage, CategoryQuery};

use crate::dto::category::{CategoryEnvelope, SearchRequest, SearchResponse};
use crate::gateway::RequestGateway;
use crate::http::ApiRequest;

/// Category operations for the signed-in store.
#[derive(Debug, Clone)]
pub struct CategoryApi {
    gateway: RequestGateway,
    store_path_prefix: String,
}

impl CategoryApi {
    /// Creates a category client over `gateway`.
    pub fn new(gateway: RequestGateway, config: &ApiConfig) -> Self {
        Self {
            gateway,
            store_path_prefix: config.store_path_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// `{prefix}/{store}/categories`, scoped by the signed-in store.
    async fn categories_path(&self) -> AppResult<String> {
        let store = self
            .gateway
            .session()
            .current_user()
            .await
            .ok_or_else(|| AppError::authentication("Store ID not found"))?;
        Ok(format!("{}/{}/categories", self.store_path_prefix, store.id))
    }

    /// Search categories by name, one page at a time.
    pub async fn search(&self, query: &CategoryQuery) -> AppResult<CategoryPage> {
        let path = format!("{}/search", self.categories_path().await?);
        let request = ApiRequest::put(path).with_json(&SearchRequest::from(query))?;

        let response: SearchResponse = self.gateway.send_json(&request).await?;
        let page = response.into_page(query.page.size);
        debug!(
            page = query.page.page,
            size = query.page.size,
            total = page.total_count,
            "Category search completed"
        );
        Ok(page)
    }

    /// Fetch one category.
    pub async fn get(&self, id: &str) -> AppResult<Category> {
        let path = format!("{}/{id}", self.categories_path().await?);
        let envelope: CategoryEnvelope = self.gateway.send_json(&ApiRequest::get(path)).await?;
        envelope
            .category
            .ok_or_else(|| AppError::not_found(format!("Category '{id}' not found")))
    }

    /// Create a category. The draft is validated before anything is sent.
    pub async fn create(&self, draft: &CategoryDraft) -> AppResult<Option<Category>> {
        draft.ensure_valid()?;
        let request = ApiRequest::post(self.categories_path().await?).with_json(draft)?;

        let envelope = self.submit(&request).await?;
        info!(
            name = %draft.name,
            sub_categories = draft.sub_categories.len(),
            "Category created"
        );
        Ok(envelope)
    }

    /// Replace a category. The draft is validated before anything is sent.
    pub async fn update(&self, id: &str, draft: &CategoryDraft) -> AppResult<Option<Category>> {
        draft.ensure_valid()?;
        let path = format!("{}/{id}", self.categories_path().await?);
        let request = ApiRequest::put(path).with_json(draft)?;

        let envelope = self.submit(&request).await?;
        info!(category_id = %id, "Category updated");
        Ok(envelope)
    }

    /// Send a write and decode the echoed category if the body carries one.
    async fn submit(&self, request: &ApiRequest) -> AppResult<Option<Category>> {
        let response = self.gateway.send(request).await?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        match response.json::<CategoryEnvelope>() {
            Ok(envelope) => Ok(envelope.category),
            Err(e) => {
                warn!(
                    path = %request.path,
                    status = response.status,
                    error = %e.message,
                    "Write accepted but the reply could not be decoded"
                );
                Ok(None)
            }
        }
    }
}
