//! Dashboard CLI command.

use std::time::Duration;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use storefront_auth::SessionRefresher;
use storefront_core::error::AppError;
use storefront_entity::dashboard::DashboardSummary;
use storefront_entity::session::SessionEvent;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};

use super::category::CategoryRow;

/// Arguments for the dashboard command
#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Re-render every SECONDS until interrupted, keeping the session fresh
    #[arg(short, long, value_name = "SECONDS")]
    pub watch: Option<u64>,
}

/// Summary display row
#[derive(Debug, Serialize, Tabled)]
struct SummaryRow {
    /// Total categories
    categories: u64,
    /// Sub-categories on the recent categories
    sub_categories: u64,
}

/// Execute the dashboard command
pub async fn execute(
    args: &DashboardArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    ctx.require_session()?;

    match args.watch {
        None => {
            let summary = ctx.dashboard.summary().await?;
            render(&summary, format);
            Ok(())
        }
        Some(seconds) => watch(ctx, Duration::from_secs(seconds.max(1)), format).await,
    }
}

/// Render repeatedly while a background refresher keeps the tokens valid.
async fn watch(ctx: &AppContext, every: Duration, format: OutputFormat) -> Result<(), AppError> {
    let refresher =
        SessionRefresher::spawn(ctx.session.clone(), ctx.config.session.refresh_interval());
    let mut events = ctx.session.subscribe_events();
    let mut ticker = tokio::time::interval(every);
    info!(every_secs = every.as_secs(), "Watching dashboard");

    let outcome = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break Ok(()),
            event = events.recv() => match event {
                Ok(SessionEvent::SessionExpired { reason }) => {
                    break Err(AppError::session_expired(reason));
                }
                Ok(SessionEvent::LoggedOut) | Err(RecvError::Closed) => {
                    break Err(AppError::authentication("Logged out"));
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
            },
            _ = ticker.tick() => match ctx.dashboard.summary().await {
                Ok(summary) => render(&summary, format),
                Err(e) if e.kind.requires_login() => break Err(e),
                Err(e) => output::print_warning(&format!("Dashboard refresh failed: {e}")),
            },
        }
    };

    refresher.shutdown().await;
    outcome
}

fn render(summary: &DashboardSummary, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_list(
                &[SummaryRow {
                    categories: summary.total_categories,
                    sub_categories: summary.total_subcategories,
                }],
                format,
            );
            println!("Recent categories:");
            let rows: Vec<CategoryRow> = summary.recent.iter().map(CategoryRow::from).collect();
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_json(summary),
    }
}
