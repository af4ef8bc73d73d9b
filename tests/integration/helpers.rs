//! Shared test helpers for integration tests.
//!
//! [`MockStoreApi`] is an in-process axum stand-in for the token and store
//! services. It issues numbered tokens, checks the raw `Authorization`
//! header on store calls, and counts every call so tests can assert exact
//! network traffic.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use storefront_auth::{SessionManager, SessionStore};
use storefront_cache::StoreManager;
use storefront_client::{
    CategoryApi, DashboardService, HttpAuthService, ReqwestTransport, RequestGateway, Transport,
};
use storefront_core::config::{AppConfig, StorageBackend};

/// Store id returned at login.
pub const STORE_ID: &str = "store-42";

/// Scripted behaviour and call counters of the mock API.
#[derive(Debug, Default)]
pub struct MockState {
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub store_calls: AtomicUsize,
    /// Reject every refresh with 401.
    pub reject_refresh: AtomicBool,
    /// Answer every store call with 401, whatever the token.
    pub reject_store_calls: AtomicBool,
    /// Delay applied to refresh replies.
    pub refresh_delay_ms: AtomicUsize,
    /// Access token currently accepted by store calls.
    pub valid_token: Mutex<String>,
    /// `Authorization` header of each store call, in order.
    pub seen_tokens: Mutex<Vec<String>>,
    /// Stored categories.
    pub categories: Mutex<Vec<Value>>,
    issued: AtomicUsize,
}

impl MockState {
    fn issue(&self) -> (String, String) {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let access = format!("access-{n}");
        *self.valid_token.lock().unwrap() = access.clone();
        (access, format!("refresh-{n}"))
    }

    /// Count a store call and return an error response if it is not authorized.
    fn authorize(&self, headers: &HeaderMap) -> Option<Response> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.seen_tokens.lock().unwrap().push(token.clone());

        let valid = *self.valid_token.lock().unwrap() == token;
        if self.reject_store_calls.load(Ordering::SeqCst) || !valid {
            let body = Json(json!({"message": "token expired"}));
            return Some((StatusCode::UNAUTHORIZED, body).into_response());
        }
        None
    }
}

/// Handle to a running mock API.
#[derive(Debug, Clone)]
pub struct MockStoreApi {
    pub state: Arc<MockState>,
    pub addr: SocketAddr,
}

impl MockStoreApi {
    /// Start the mock on an ephemeral port, seeded with `categories`.
    pub async fn start(categories: Vec<Value>) -> Self {
        let state = Arc::new(MockState::default());
        *state.categories.lock().unwrap() = categories;

        let prefix = "/store_svc/v1/stores/{store}/categories";
        let router = Router::new()
            .route("/token_svc/v1/stores/login", post(login))
            .route("/token_svc/v1/store_users/tokens/refresh", post(refresh))
            .route(&format!("{prefix}/search"), put(search))
            .route(prefix, post(create))
            .route(&format!("{prefix}/{{id}}"), get(fetch).put(update))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { state, addr }
    }

    /// Start the mock with the default catalogue.
    pub async fn start_seeded() -> Self {
        Self::start(seed_categories()).await
    }

    /// Make the server stop accepting the access token it last issued.
    pub fn expire_access_token(&self) {
        *self.state.valid_token.lock().unwrap() = "revoked".to_string();
    }

    pub fn store_calls(&self) -> usize {
        self.state.store_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    pub fn seen_tokens(&self) -> Vec<String> {
        self.state.seen_tokens.lock().unwrap().clone()
    }

    /// Configuration pointing at this mock with in-memory session storage.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.api.base_url = format!("http://{}", self.addr);
        config.api.request_timeout_seconds = 5;
        config.session.storage = StorageBackend::Memory;
        config
    }
}

/// Ten snack categories with one sub-category each, then two teas with two.
pub fn seed_categories() -> Vec<Value> {
    let mut categories: Vec<Value> = (1..=10)
        .map(|i| {
            json!({
                "uuid": format!("cat-{i:02}"),
                "name": format!("Snacks {i:02}"),
                "description": "",
                "sub_categories": [{"uuid": format!("sub-{i:02}"), "name": "Chips", "description": ""}],
            })
        })
        .collect();
    for (uuid, name) in [("cat-11", "Green tea"), ("cat-12", "Black tea")] {
        categories.push(json!({
            "uuid": uuid,
            "name": name,
            "description": "Loose leaf",
            "sub_categories": [
                {"uuid": format!("{uuid}-a"), "name": "Bags", "description": ""},
                {"uuid": format!("{uuid}-b"), "name": "Tins", "description": null},
            ],
        }));
    }
    categories
}

/// The client-side stack wired the way the CLI wires it.
#[derive(Debug, Clone)]
pub struct TestClient {
    pub session: SessionManager,
    pub categories: CategoryApi,
    pub dashboard: DashboardService,
}

impl TestClient {
    /// Build the stack from `config` and restore any persisted session.
    pub async fn new(config: &AppConfig) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.api).unwrap());
        let stores = StoreManager::new(&config.session).unwrap();
        let session_store = SessionStore::from_config(stores.store(), &config.session);
        let auth = HttpAuthService::new(Arc::clone(&transport), &config.api);
        let session = SessionManager::new(Arc::new(auth), session_store);
        session.restore().await.unwrap();

        let gateway = RequestGateway::new(transport, session.clone());
        let categories = CategoryApi::new(gateway, &config.api);
        let dashboard = DashboardService::new(categories.clone(), config.ui.dashboard_recent);
        Self {
            session,
            categories,
            dashboard,
        }
    }

    /// Build the stack and sign in with the valid test credentials.
    pub async fn signed_in(config: &AppConfig) -> Self {
        let client = Self::new(config).await;
        client.session.login("a@b.com", "pw").await.unwrap();
        client
    }
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["email"] != "a@b.com" || body["password"] != "pw" {
        let body = Json(json!({"message": "bad credentials"}));
        return (StatusCode::UNAUTHORIZED, body).into_response();
    }

    let (access, refresh) = state.issue();
    Json(json!({
        "token_response": {"response": {"access_token": access, "refresh_token": refresh}},
        "store_details": {"uuid": STORE_ID, "name": "Corner Shop"},
    }))
    .into_response()
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay as u64)).await;
    }
    if state.reject_refresh.load(Ordering::SeqCst)
        || !body["request"]["refresh_token"]
            .as_str()
            .is_some_and(|t| t.starts_with("refresh-"))
    {
        let body = Json(json!({"message": "invalid refresh token"}));
        return (StatusCode::UNAUTHORIZED, body).into_response();
    }

    let (access, refresh) = state.issue();
    Json(json!({"response": {"access_token": access, "refresh_token": refresh}})).into_response()
}

async fn search(
    State(state): State<Arc<MockState>>,
    Path(store): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejected) = state.authorize(&headers) {
        return rejected;
    }
    if store != STORE_ID {
        return StatusCode::NOT_FOUND.into_response();
    }

    let term = body["request"][0]["value"].as_str().map(str::to_lowercase);
    let page = body["pageRequest"]["page"].as_u64().unwrap_or(0) as usize;
    let size = body["pageRequest"]["size"].as_u64().unwrap_or(10) as usize;

    let categories = state.categories.lock().unwrap();
    let matching: Vec<&Value> = categories
        .iter()
        .filter(|c| match &term {
            Some(term) => c["name"].as_str().unwrap_or_default().to_lowercase().contains(term),
            None => true,
        })
        .collect();
    let page_items: Vec<&Value> = matching.iter().skip(page * size).take(size).copied().collect();

    Json(json!({
        "response": page_items,
        "page_response": {"total": matching.len()},
    }))
    .into_response()
}

async fn fetch(
    State(state): State<Arc<MockState>>,
    Path((_store, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = state.authorize(&headers) {
        return rejected;
    }
    let categories = state.categories.lock().unwrap();
    match categories.iter().find(|c| c["uuid"] == id.as_str()) {
        Some(category) => Json(json!({"category": category})).into_response(),
        None => (StatusCode::NOT_FOUND, "category not found").into_response(),
    }
}

async fn create(
    State(state): State<Arc<MockState>>,
    Path(_store): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(rejected) = state.authorize(&headers) {
        return rejected;
    }
    if body["name"] == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    let mut categories = state.categories.lock().unwrap();
    body["uuid"] = json!(format!("cat-{:02}", categories.len() + 1));
    categories.push(body.clone());
    (StatusCode::CREATED, Json(json!({"category": body}))).into_response()
}

async fn update(
    State(state): State<Arc<MockState>>,
    Path((_store, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(rejected) = state.authorize(&headers) {
        return rejected;
    }

    let mut categories = state.categories.lock().unwrap();
    match categories.iter_mut().find(|c| c["uuid"] == id.as_str()) {
        Some(category) => {
            body["uuid"] = json!(id);
            *category = body.clone();
            Json(json!({"category": body})).into_response()
        }
        None => (StatusCode::NOT_FOUND, "category not found").into_response(),
    }
}
