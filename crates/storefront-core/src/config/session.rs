//! Session lifecycle configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Period of the background token refresh in seconds.
    ///
    /// Must be strictly shorter than the access token lifetime so at least
    /// one refresh lands before the token expires.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Lifetime of the persisted access token in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Lifetime of the persisted refresh token and user profile in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Where the session record is persisted.
    #[serde(default)]
    pub storage: StorageBackend,
    /// Path of the session file when `storage = "file"`.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// The public login route.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Root of the protected area.
    #[serde(default = "default_home_route")]
    pub home_route: String,
}

impl SessionConfig {
    /// Background refresh period.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }

    /// Access token persistence TTL.
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_seconds)
    }

    /// Refresh token and profile persistence TTL.
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_seconds)
    }

    /// Validate interval/TTL ordering and route distinctness.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.refresh_interval_seconds == 0 {
            return Err(AppError::configuration(
                "session.refresh_interval_seconds must be greater than zero",
            ));
        }
        if self.refresh_interval_seconds >= self.access_token_ttl_seconds {
            return Err(AppError::configuration(format!(
                "session.refresh_interval_seconds ({}) must be shorter than \
                 session.access_token_ttl_seconds ({})",
                self.refresh_interval_seconds, self.access_token_ttl_seconds
            )));
        }
        if self.login_route == self.home_route {
            return Err(AppError::configuration(
                "session.login_route and session.home_route must differ",
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: default_refresh_interval(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            storage: StorageBackend::default(),
            storage_path: default_storage_path(),
            login_route: default_login_route(),
            home_route: default_home_route(),
        }
    }
}

/// Backend used to persist the session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON file that survives process restarts.
    #[default]
    File,
    /// Process-local memory only.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

fn default_refresh_interval() -> u64 {
    240
}

fn default_access_ttl() -> u64 {
    86_400
}

fn default_refresh_ttl() -> u64 {
    30 * 86_400
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/session.json")
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_home_route() -> String {
    "/dashboard".to_string()
}
