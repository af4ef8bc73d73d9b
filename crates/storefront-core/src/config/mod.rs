//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so an empty file is a valid config.

pub mod api;
pub mod logging;
pub mod session;
pub mod ui;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::session::{SessionConfig, StorageBackend};
pub use self::ui::UiConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote store API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session lifecycle settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Listing and dashboard settings.
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the file at `config_path` with an environment-specific overlay
    /// (`config/{env}.toml`) and environment variables prefixed with
    /// `STOREFRONT__`. Missing files are skipped.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STOREFRONT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.session.validate()?;
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if self.ui.page_size == 0 {
            return Err(AppError::configuration("ui.page_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.refresh_interval_seconds, 240);
        assert_eq!(config.ui.page_size, 10);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = AppConfig::load("config/does-not-exist", "missing").unwrap();
        assert_eq!(config.api.login_path, "/token_svc/v1/stores/login");
        assert_eq!(config.session.storage, StorageBackend::File);
    }

    #[test]
    fn test_refresh_interval_must_be_shorter_than_ttl() {
        let mut config = AppConfig::default();
        config.session.refresh_interval_seconds = config.session.access_token_ttl_seconds;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
