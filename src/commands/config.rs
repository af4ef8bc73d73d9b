//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use storefront_core::config::AppConfig;
use storefront_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
///
/// `config` was validated while loading, so `validate` only reports.
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("API", &config.api.base_url);
            output::print_kv("Session storage", &config.session.storage.to_string());
            output::print_kv(
                "Refresh interval",
                &format!("{}s", config.session.refresh_interval_seconds),
            );
            output::print_kv(
                "Access token TTL",
                &format!("{}s", config.session.access_token_ttl_seconds),
            );
        }
    }
    Ok(())
}
