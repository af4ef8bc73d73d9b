//! Login, logout, persistence and forced expiry.

use std::sync::atomic::Ordering;

use storefront_core::config::StorageBackend;
use storefront_core::error::ErrorKind;
use storefront_entity::category::CategoryQuery;
use storefront_entity::session::{SessionEvent, SessionState};

use crate::helpers::{MockStoreApi, STORE_ID, TestClient};

#[tokio::test]
async fn test_login_success() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::new(&api.config()).await;

    let identity = client.session.login("a@b.com", "pw").await.unwrap();

    assert_eq!(identity.id, STORE_ID);
    assert_eq!(client.session.state(), SessionState::Authenticated);
    assert_eq!(client.session.access_token().await.as_deref(), Some("access-1"));
    assert_eq!(api.login_calls(), 1);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::new(&api.config()).await;

    let err = client.session.login("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    assert_eq!(client.session.state(), SessionState::Unauthenticated);
    assert!(client.session.current_user().await.is_none());
}

#[tokio::test]
async fn test_login_unreachable_service() {
    let api = MockStoreApi::start_seeded().await;
    let mut config = api.config();
    // Nothing listens on the discard port.
    config.api.base_url = "http://127.0.0.1:9".to_string();
    let client = TestClient::new(&config).await;

    let err = client.session.login("a@b.com", "pw").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    assert!(err.kind.is_retryable());
    assert_eq!(client.session.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_session_survives_restart_with_file_storage() {
    let api = MockStoreApi::start_seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = api.config();
    config.session.storage = StorageBackend::File;
    config.session.storage_path = dir.path().join("session.json");

    let first = TestClient::signed_in(&config).await;
    drop(first);

    let second = TestClient::new(&config).await;
    assert_eq!(second.session.state(), SessionState::Authenticated);
    assert_eq!(second.session.current_user().await.unwrap().id, STORE_ID);

    // The restored token is still accepted by the server.
    let page = second
        .categories
        .search(&CategoryQuery::page(0, 5))
        .await
        .unwrap();
    assert_eq!(page.total_count, 12);
    assert_eq!(api.login_calls(), 1);
}

#[tokio::test]
async fn test_logout_clears_persisted_session() {
    let api = MockStoreApi::start_seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = api.config();
    config.session.storage = StorageBackend::File;
    config.session.storage_path = dir.path().join("session.json");

    let client = TestClient::signed_in(&config).await;
    client.session.logout().await.unwrap();
    assert_eq!(client.session.state(), SessionState::Unauthenticated);

    let restarted = TestClient::new(&config).await;
    assert_eq!(restarted.session.state(), SessionState::Unauthenticated);
    assert!(restarted.session.current_user().await.is_none());
}

#[tokio::test]
async fn test_rejected_refresh_forces_logout() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;
    let mut events = client.session.subscribe_events();
    api.state.reject_refresh.store(true, Ordering::SeqCst);

    let err = client.session.refresh().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::SessionExpired);
    assert!(err.kind.requires_login());
    assert_eq!(client.session.state(), SessionState::Unauthenticated);
    assert!(client.session.access_token().await.is_none());

    let event = events.recv().await.unwrap();
    assert!(matches!(event, SessionEvent::SessionExpired { .. }));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let api = MockStoreApi::start_seeded().await;
    let client = TestClient::signed_in(&api.config()).await;

    let token = client.session.refresh().await.unwrap();

    assert_eq!(token, "access-2");
    assert_eq!(client.session.access_token().await.as_deref(), Some("access-2"));
    assert_eq!(client.session.current_user().await.unwrap().id, STORE_ID);
    assert_eq!(client.session.state(), SessionState::Authenticated);
}
