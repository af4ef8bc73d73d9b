//! Token service request and response bodies.

use serde::{Deserialize, Serialize};

use storefront_entity::session::{Identity, LoginGrant, TokenPair};

/// Body of the login call.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Store account email.
    pub email: &'a str,
    /// Store account password.
    pub password: &'a str,
}

/// Access/refresh pair as issued at login.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuedTokens {
    /// Issued access token.
    pub access_token: String,
    /// Issued refresh token.
    pub refresh_token: String,
}

/// `token_response` envelope of the login reply.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEnvelope {
    /// The issued pair.
    pub response: IssuedTokens,
}

/// Reply of the login call.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Issued tokens.
    pub token_response: TokenEnvelope,
    /// The signed-in store.
    pub store_details: Identity,
}

impl From<LoginResponse> for LoginGrant {
    fn from(resp: LoginResponse) -> Self {
        Self {
            access_token: resp.token_response.response.access_token,
            refresh_token: resp.token_response.response.refresh_token,
            identity: resp.store_details,
        }
    }
}

/// Inner body of the refresh call.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshPayload<'a> {
    /// The refresh credential.
    pub refresh_token: &'a str,
}

/// Body of the refresh call.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    /// Wrapped payload.
    pub request: RefreshPayload<'a>,
}

impl<'a> RefreshRequest<'a> {
    /// Wrap a refresh token.
    pub fn new(refresh_token: &'a str) -> Self {
        Self {
            request: RefreshPayload { refresh_token },
        }
    }
}

/// Tokens returned by the refresh call.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedTokens {
    /// New access token.
    pub access_token: String,
    /// Rotated refresh token, when the service issued one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Reply of the refresh call.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    /// The new tokens.
    pub response: RefreshedTokens,
}

impl From<RefreshResponse> for TokenPair {
    fn from(resp: RefreshResponse) -> Self {
        Self {
            access_token: resp.response.access_token,
            refresh_token: resp.response.refresh_token.filter(|t| !t.is_empty()),
        }
    }
}
