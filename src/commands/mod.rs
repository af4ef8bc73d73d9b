//! CLI command definitions and dispatch.

pub mod category;
pub mod config;
pub mod dashboard;
pub mod session;

use clap::{Parser, Subcommand};

use storefront_core::config::AppConfig;
use storefront_core::error::AppError;

use crate::app::AppContext;
use crate::output::OutputFormat;

/// Storefront: category administration for your store
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in to the store API
    Login(session::LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in store
    Whoami,
    /// Renew the session tokens now
    Refresh,
    /// Show the dashboard summary
    Dashboard(dashboard::DashboardArgs),
    /// Category management
    Category(category::CategoryArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = AppContext::build(config).await?;
        match &self.command {
            Commands::Login(args) => session::login(args, &ctx, self.format).await,
            Commands::Logout => session::logout(&ctx).await,
            Commands::Whoami => session::whoami(&ctx, self.format).await,
            Commands::Refresh => session::refresh(&ctx).await,
            Commands::Dashboard(args) => dashboard::execute(args, &ctx, self.format).await,
            Commands::Category(args) => category::execute(args, &ctx, self.format).await,
            Commands::Config(args) => config::execute(args, &ctx.config, &self.config, self.format),
        }
    }
}

/// Helper: map a prompt failure into an application error
pub fn input_error(err: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {err}"))
}
