//! Session persistence over an expiring key-value store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use storefront_core::config::SessionConfig;
use storefront_core::error::AppError;
use storefront_core::traits::KeyValueStore;
use storefront_entity::session::{Identity, Session};

/// Key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Key holding the JSON-encoded identity.
pub const USER_KEY: &str = "user";

const ALL_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Reads and writes the three session fields as one record.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Backing store.
    kv: Arc<dyn KeyValueStore>,
    /// Lifetime of the access token entry.
    access_ttl: Duration,
    /// Lifetime of the refresh token and user entries.
    refresh_ttl: Duration,
}

impl SessionStore {
    /// Creates a session store with explicit entry lifetimes.
    pub fn new(kv: Arc<dyn KeyValueStore>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            kv,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Creates a session store using the configured lifetimes.
    pub fn from_config(kv: Arc<dyn KeyValueStore>, config: &SessionConfig) -> Self {
        Self::new(kv, config.access_token_ttl(), config.refresh_token_ttl())
    }

    /// Loads the persisted session.
    ///
    /// Returns `None` when nothing is stored. A partial or unparsable record
    /// is cleared and also yields `None`.
    pub async fn load(&self) -> Result<Option<Session>, AppError> {
        let access = self.kv.get(ACCESS_TOKEN_KEY).await?;
        let refresh = self.kv.get(REFRESH_TOKEN_KEY).await?;
        let user = self.kv.get(USER_KEY).await?;

        match (access, refresh, user) {
            (None, None, None) => Ok(None),
            (Some(access_token), Some(refresh_token), Some(user)) => {
                match serde_json::from_str::<Identity>(&user) {
                    Ok(user) => Ok(Some(Session {
                        access_token,
                        refresh_token,
                        user,
                    })),
                    Err(e) => {
                        warn!(error = %e, "Stored user profile is unreadable, clearing session");
                        self.clear().await?;
                        Ok(None)
                    }
                }
            }
            (access, refresh, user) => {
                warn!(
                    has_access = access.is_some(),
                    has_refresh = refresh.is_some(),
                    has_user = user.is_some(),
                    "Partial session record found, clearing"
                );
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Persists a complete session.
    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        let user = serde_json::to_string(&session.user)?;
        self.kv.set(USER_KEY, &user, self.refresh_ttl).await?;
        self.save_tokens(session).await?;
        debug!(user_id = %session.user.id, backend = self.kv.backend(), "Session persisted");
        Ok(())
    }

    /// Persists only the token fields, leaving the stored identity untouched.
    pub async fn save_tokens(&self, session: &Session) -> Result<(), AppError> {
        self.kv
            .set(REFRESH_TOKEN_KEY, &session.refresh_token, self.refresh_ttl)
            .await?;
        self.kv
            .set(ACCESS_TOKEN_KEY, &session.access_token, self.access_ttl)
            .await
    }

    /// Removes every session field.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.kv.remove_many(&ALL_KEYS).await
    }
}
