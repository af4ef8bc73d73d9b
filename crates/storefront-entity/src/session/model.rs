//! Session record and the credential payloads that build it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimal identity of the signed-in store.
///
/// Captured once at login and never re-fetched. The store API calls the
/// identifier `uuid`, which is kept as the wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Store identifier; scopes every category call.
    #[serde(rename = "uuid")]
    pub id: String,
    /// Store display name.
    pub name: String,
}

impl Identity {
    /// Create a new identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Access/refresh credential pair returned by the auth service.
///
/// `refresh_token` is `None` when the service did not rotate it.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Replacement refresh credential, if one was issued.
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Create a pair with both tokens present.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Create a pair where only the access token was reissued.
    pub fn access_only(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    /// Issued access token.
    pub access_token: String,
    /// Issued refresh token.
    pub refresh_token: String,
    /// Identity of the signed-in store.
    pub identity: Identity,
}

impl From<LoginGrant> for Session {
    fn from(grant: LoginGrant) -> Self {
        Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            user: grant.identity,
        }
    }
}

/// The authentication state of the current client context.
///
/// All three fields exist together. A record missing any of them is
/// treated as corrupt by the session store and never constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer credential sent on every outbound call.
    pub access_token: String,
    /// Credential used solely to mint new access tokens.
    pub refresh_token: String,
    /// Identity captured at login.
    pub user: Identity,
}

impl Session {
    /// Return a copy with rotated tokens and the same identity.
    ///
    /// The refresh token is replaced only when the service issued one.
    #[must_use]
    pub fn with_tokens(&self, tokens: &TokenPair) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens
                .refresh_token
                .clone()
                .unwrap_or_else(|| self.refresh_token.clone()),
            user: self.user.clone(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
