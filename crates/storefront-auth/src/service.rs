//! Contract of the remote auth service.

use async_trait::async_trait;

use storefront_core::result::AppResult;
use storefront_entity::session::{LoginGrant, TokenPair};

/// Remote service that issues and rotates credentials.
///
/// Implemented over HTTP in `storefront-client`; tests use scripted fakes.
#[async_trait]
pub trait AuthService: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange credentials for a token pair and the store identity.
    ///
    /// Fails with `InvalidCredentials` or `ServiceUnavailable`.
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginGrant>;

    /// Mint a new access token from a refresh token.
    ///
    /// Fails with `SessionExpired` when the refresh token is rejected, or
    /// `ServiceUnavailable`.
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair>;
}
