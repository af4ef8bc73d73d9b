//! Category and dashboard flows over the mock store API.

use storefront_core::error::ErrorKind;
use storefront_entity::category::{CategoryDraft, CategoryQuery};

use crate::helpers::{MockStoreApi, TestClient};

#[tokio::test]
async fn test_search_pages_through_categories() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let first = client.categories.search(&CategoryQuery::page(0, 5)).await.unwrap();
    assert_eq!(first.total_count, 12);
    assert_eq!(first.page_count, 3);
    assert_eq!(first.categories[0].name, "Snacks 01");

    let last = client.categories.search(&CategoryQuery::page(2, 5)).await.unwrap();
    assert_eq!(last.categories.len(), 2);
    assert_eq!(last.categories[1].name, "Black tea");
}

#[tokio::test]
async fn test_search_filters_by_name() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let query = CategoryQuery::page(0, 10).with_search("TEA");
    let page = client.categories.search(&query).await.unwrap();

    assert_eq!(page.total_count, 2);
    assert_eq!(page.page_count, 1);
    let names: Vec<&str> = page.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Green tea", "Black tea"]);
    // Sub-category descriptions sent as null read back empty.
    assert_eq!(page.categories[0].sub_categories[1].description, "");
}

#[tokio::test]
async fn test_create_then_get() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let draft = CategoryDraft::new("Dairy")
        .with_description("Milk and cheese")
        .with_sub_category("Cheese", "");
    let created = client.categories.create(&draft).await.unwrap().unwrap();
    assert_eq!(created.uuid, "cat-13");

    let fetched = client.categories.get(&created.uuid).await.unwrap();
    assert_eq!(fetched.name, "Dairy");
    assert_eq!(fetched.description, "Milk and cheese");
    assert_eq!(fetched.sub_category_count(), 1);
}

#[tokio::test]
async fn test_update_keeps_existing_sub_categories() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let current = client.categories.get("cat-11").await.unwrap();
    let mut draft = CategoryDraft::from(current);
    draft.name = "Jasmine tea".to_string();
    draft = draft.with_sub_category("Pouches", "");

    client.categories.update("cat-11", &draft).await.unwrap();

    let updated = client.categories.get("cat-11").await.unwrap();
    assert_eq!(updated.name, "Jasmine tea");
    assert_eq!(updated.sub_category_count(), 3);
    assert_eq!(updated.sub_categories[0].uuid.as_deref(), Some("cat-11-a"));
    assert_eq!(updated.sub_categories[2].uuid, None);
}

#[tokio::test]
async fn test_unknown_category_is_an_error() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let err = client.categories.get("missing").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_invalid_draft_is_not_sent() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let err = client
        .categories
        .create(&CategoryDraft::new("  "))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(api.store_calls(), 0);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let api = MockStoreApi::start_seeded().await;
    let mut config = api.config();
    config.ui.dashboard_recent = 5;
    let client = TestClient::signed_in(&config).await;

    let summary = client.dashboard.summary().await.unwrap();

    assert_eq!(summary.total_categories, 12);
    assert_eq!(summary.recent.len(), 5);
    assert_eq!(summary.total_subcategories, 5);
}
