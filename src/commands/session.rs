//! Session CLI commands: login, logout, whoami, refresh.

use std::io::BufRead;

use clap::Args;

use storefront_core::error::AppError;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Store account email (prompted when omitted)
    #[arg(short = 'u', long)]
    pub email: Option<String>,

    /// Read the password from the first line of stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

/// Sign in and persist the session
pub async fn login(
    args: &LoginArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    ctx.require_signed_out()?;

    let email = match &args.email {
        Some(email) => email.clone(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(super::input_error)?,
    };

    let password = if args.password_stdin {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?;
        line.trim_end_matches(['\r', '\n']).to_string()
    } else {
        dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(super::input_error)?
    };

    let user = ctx.session.login(&email, &password).await?;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Logged in as {} ({})", user.name, user.id));
        }
        OutputFormat::Json => output::print_json(&user),
    }
    Ok(())
}

/// Sign out. Succeeds when already signed out.
pub async fn logout(ctx: &AppContext) -> Result<(), AppError> {
    let was_signed_in = ctx.session.is_authenticated();
    ctx.session.logout().await?;
    if was_signed_in {
        output::print_success("Logged out");
    } else {
        output::print_warning("Not logged in");
    }
    Ok(())
}

/// Show the signed-in store
pub async fn whoami(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    ctx.require_session()?;
    let user = ctx
        .session
        .current_user()
        .await
        .ok_or_else(|| AppError::authentication("Not logged in"))?;

    match format {
        OutputFormat::Table => {
            output::print_kv("Store", &user.name);
            output::print_kv("Store ID", &user.id);
            output::print_kv("Session", ctx.session.state().as_str());
        }
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "store": user,
            "state": ctx.session.state(),
        })),
    }
    Ok(())
}

/// Refresh the session tokens immediately
pub async fn refresh(ctx: &AppContext) -> Result<(), AppError> {
    ctx.require_session()?;
    ctx.session.refresh().await?;
    output::print_success("Session refreshed");
    Ok(())
}
