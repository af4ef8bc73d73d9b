//! HTTP implementation of the auth service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use storefront_auth::AuthService;
use storefront_core::config::ApiConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_entity::session::{LoginGrant, TokenPair};

use crate::dto::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use crate::http::{ApiRequest, ApiResponse, Transport};

/// Talks to the token service. Calls are sent without an access token.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    transport: Arc<dyn Transport>,
    login_path: String,
    refresh_path: String,
}

impl HttpAuthService {
    /// Creates a new auth service client.
    pub fn new(transport: Arc<dyn Transport>, config: &ApiConfig) -> Self {
        Self {
            transport,
            login_path: config.login_path.clone(),
            refresh_path: config.refresh_path.clone(),
        }
    }

    async fn post(&self, request: ApiRequest, operation: &'static str) -> AppResult<ApiResponse> {
        self.transport.send(&request, None).await.map_err(|e| {
            if e.kind == ErrorKind::Network {
                warn!(operation, error = %e.message, "Auth service unreachable");
                AppError::service_unavailable(format!("Auth service unreachable: {}", e.message))
            } else {
                e
            }
        })
    }
}

fn unavailable(response: &ApiResponse) -> AppError {
    AppError::service_unavailable(format!("Auth service returned {}", response.status))
        .with_status(response.status)
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginGrant> {
        let request =
            ApiRequest::post(&self.login_path).with_json(&LoginRequest { email, password })?;
        let response = self.post(request, "login").await?;
        debug!(status = response.status, "Login response received");

        match response.status {
            401 | 403 => Err(AppError::invalid_credentials("Invalid email or password")
                .with_status(response.status)),
            _ if response.is_server_error() => Err(unavailable(&response)),
            _ => {
                let response = response.error_for_status()?;
                Ok(response.json::<LoginResponse>()?.into())
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let request =
            ApiRequest::post(&self.refresh_path).with_json(&RefreshRequest::new(refresh_token))?;
        let response = self.post(request, "refresh").await?;
        debug!(status = response.status, "Refresh response received");

        match response.status {
            400 | 401 | 403 => Err(AppError::session_expired("Refresh token was rejected")
                .with_status(response.status)),
            _ if response.is_server_error() => Err(unavailable(&response)),
            _ => {
                let response = response.error_for_status()?;
                Ok(response.json::<RefreshResponse>()?.into())
            }
        }
    }
}
