//! Login, logout and session status

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use dialoguer::{Confirm, Input, Password};

use crate::api::refresh_unread;
use crate::cli::{anonymous_client, session_client, state_bus, ui};
use crate::session::{Role, Session, SessionStore};

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in to the marketplace backend
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Log out and clear the cached session
    Logout {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the cached session
    Status,
}

pub async fn auth_command(cmd: AuthCommands) -> Result<()> {
    match cmd {
        AuthCommands::Login { email } => login(email).await,
        AuthCommands::Logout { yes } => logout(yes).await,
        AuthCommands::Status => status().await,
    }
}

async fn login(email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .context("Failed to read email")?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("Failed to read password")?;

    let client = anonymous_client().await?;
    let response = client.login(email, password).await?;

    let session = Session {
        user_id: response.user_id,
        role: Role::parse(&response.role),
        token: response.token,
        expires_at: response.expires_at,
    };

    let bus = state_bus().await?;
    SessionStore::new(bus.clone()).store(&session).await?;

    // Warm the badge for whoever is watching
    let (authed, _) = session_client(&bus).await?;
    refresh_unread(&authed, &bus).await;

    println!(
        "  {} Logged in as {} ({})",
        "✓".bright_green(),
        session.user_id.bright_white().bold(),
        session.role
    );
    Ok(())
}

async fn logout(yes: bool) -> Result<()> {
    let bus = state_bus().await?;
    let sessions = SessionStore::new(bus.clone());

    let Some(session) = sessions.current().await else {
        println!("  {}", "Not logged in".dimmed());
        return Ok(());
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Log out {}?", session.user_id))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            return Ok(());
        }
    }

    // Server-side invalidation is best effort; the local marker always goes
    if let Ok((client, _)) = session_client(&bus).await {
        if let Err(e) = client.logout().await {
            log::warn!("Server logout failed: {:#}", e);
        }
    }
    sessions.clear().await?;

    println!("  {} Logged out", "✓".bright_green());
    Ok(())
}

async fn status() -> Result<()> {
    ui::header("Hearth Session");

    let bus = state_bus().await?;
    match SessionStore::new(bus).current().await {
        Some(session) => {
            println!();
            println!(
                "  {} {}",
                "User:".dimmed(),
                session.user_id.bright_white().bold()
            );
            println!("  {} {}", "Role:".dimmed(), session.role);
            match session.expires_at {
                Some(at) => println!("  {} {}", "Expires:".dimmed(), at.to_rfc3339()),
                None => println!("  {} {}", "Expires:".dimmed(), "never".dimmed()),
            }
        }
        None => {
            println!();
            println!("  {}", "⚠️  Not logged in".bright_yellow().bold());
            println!("  {}", "Run 'hearth-cli auth login' to sign in".dimmed());
        }
    }
    Ok(())
}
