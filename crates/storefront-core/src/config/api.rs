//! Remote store API configuration.

use serde::{Deserialize, Serialize};

/// Endpoints and transport settings for the store API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the store API (scheme, host and port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Path of the store login endpoint.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Path of the token refresh endpoint.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Prefix under which store-scoped resources live.
    #[serde(default = "default_store_path_prefix")]
    pub store_path_prefix: String,
}

impl ApiConfig {
    /// Join the base URL and a path without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            login_path: default_login_path(),
            refresh_path: default_refresh_path(),
            store_path_prefix: default_store_path_prefix(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_login_path() -> String {
    "/token_svc/v1/stores/login".to_string()
}

fn default_refresh_path() -> String {
    "/token_svc/v1/store_users/tokens/refresh".to_string()
}

fn default_store_path_prefix() -> String {
    "/store_svc/v1/stores".to_string()
}
