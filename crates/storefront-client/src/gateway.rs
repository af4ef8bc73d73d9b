//! Authenticated request gateway with a single refresh-and-retry on 401.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use storefront_auth::SessionManager;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;

use crate::http::{ApiRequest, ApiResponse, Transport};

/// Retry bookkeeping for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    /// Sent with the token that was current when the call started.
    Untried,
    /// Resent once with a freshly refreshed token.
    Retried,
    /// Rejected after the retry; no further attempts.
    Failed,
}

impl RetryState {
    fn after_unauthorized(self) -> Self {
        match self {
            Self::Untried => Self::Retried,
            Self::Retried | Self::Failed => Self::Failed,
        }
    }
}

/// Sends store API calls with the current access token.
///
/// The gateway only reads the session; refresh and forced logout happen
/// inside [`SessionManager::refresh`].
#[derive(Debug, Clone)]
pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    session: SessionManager,
}

impl RequestGateway {
    /// Create a gateway over `transport` reading tokens from `session`.
    pub fn new(transport: Arc<dyn Transport>, session: SessionManager) -> Self {
        Self { transport, session }
    }

    /// The session this gateway reads from.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Send an authenticated request.
    ///
    /// Fails with `Authentication` when there is no session, when the
    /// refresh after a 401 fails, or when the retried call is also rejected.
    /// Other non-2xx responses fail with `Server`; transport failures with
    /// `Network`.
    pub async fn send(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let mut token = self
            .session
            .access_token()
            .await
            .ok_or_else(|| AppError::authentication("Not logged in"))?;
        let mut state = RetryState::Untried;

        loop {
            let response = self.transport.send(request, Some(&token)).await?;
            if !response.is_unauthorized() {
                return response.error_for_status();
            }

            state = state.after_unauthorized();
            match state {
                RetryState::Retried => {
                    debug!(
                        method = %request.method,
                        path = %request.path,
                        "Access token rejected, refreshing"
                    );
                    token = self.session.refresh().await.map_err(|e| {
                        warn!(kind = %e.kind, "Refresh after 401 failed");
                        AppError::authentication(format!(
                            "Session could not be renewed: {}",
                            e.message
                        ))
                    })?;
                }
                RetryState::Failed | RetryState::Untried => {
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        "Request rejected after token refresh"
                    );
                    return Err(AppError::authentication(
                        "Request was rejected after refreshing the session",
                    )
                    .with_status(response.status));
                }
            }
        }
    }

    /// Send an authenticated request and decode the JSON reply.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> AppResult<T> {
        self.send(request).await?.json()
    }
}
