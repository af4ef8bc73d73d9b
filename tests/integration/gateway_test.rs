//! 401 handling through the request gateway.

use std::sync::atomic::Ordering;

use storefront_core::error::ErrorKind;
use storefront_entity::category::{CategoryDraft, CategoryQuery};
use storefront_entity::session::SessionState;

use crate::helpers::{MockStoreApi, TestClient};

#[tokio::test]
async fn test_expired_token_refreshes_and_retries_once() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;
    api.expire_access_token();

    let page = client
        .categories
        .search(&CategoryQuery::page(0, 10))
        .await
        .unwrap();

    assert_eq!(page.total_count, 12);
    assert_eq!(api.store_calls(), 2);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(api.seen_tokens(), vec!["access-1", "access-2"]);
    assert_eq!(client.session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_second_401_is_not_retried_again() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;
    api.state.reject_store_calls.store(true, Ordering::SeqCst);

    let err = client
        .categories
        .search(&CategoryQuery::page(0, 10))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.status, Some(401));
    assert_eq!(api.store_calls(), 2);
    assert_eq!(api.refresh_calls(), 1);
    // The refresh itself succeeded, so the session is kept.
    assert_eq!(client.session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_failed_refresh_after_401_logs_out() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;
    api.expire_access_token();
    api.state.reject_refresh.store(true, Ordering::SeqCst);

    let err = client
        .categories
        .search(&CategoryQuery::page(0, 10))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(api.store_calls(), 1);
    assert_eq!(client.session.state(), SessionState::Unauthenticated);

    let err = client
        .categories
        .search(&CategoryQuery::page(0, 10))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(api.store_calls(), 1);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;
    api.expire_access_token();
    api.state.refresh_delay_ms.store(300, Ordering::SeqCst);

    let first = CategoryQuery::page(0, 5);
    let second = CategoryQuery::page(1, 5);
    let (a, b) = tokio::join!(
        client.categories.search(&first),
        client.categories.search(&second),
    );

    assert_eq!(a.unwrap().categories.len(), 5);
    assert_eq!(b.unwrap().categories.len(), 5);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(api.store_calls(), 4);
    assert_eq!(client.session.access_token().await.as_deref(), Some("access-2"));
}

#[tokio::test]
async fn test_server_error_surfaces_without_refresh() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let err = client
        .categories
        .create(&CategoryDraft::new("boom"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.status, Some(500));
    assert_eq!(api.refresh_calls(), 0);
    assert_eq!(client.session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_signed_out_requests_never_reach_the_server() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::new(&api.config()).await;

    let err = client
        .categories
        .search(&CategoryQuery::page(0, 10))
        .await
        .unwrap_err();

    assert!(err.kind.requires_login());
    assert_eq!(api.store_calls(), 0);
}
