//! Command-line interface

pub mod app;
pub mod commands;
pub mod ui;

pub use app::{Cli, Commands};

use anyhow::Result;
use std::sync::Arc;

use crate::api::MarketClient;
use crate::bus::StateBus;
use crate::config::options::registrations::api as api_keys;
use crate::session::{Session, SessionStore};

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => commands::auth::auth_command(cmd).await,
        Commands::Prefs(cmd) => commands::prefs::prefs_command(cmd).await,
        Commands::Notifications(cmd) => {
            commands::notifications::notifications_command(cmd).await
        }
        Commands::Listings(cmd) => commands::listings::listings_command(cmd).await,
        Commands::Shell => commands::shell::shell_command().await,
    }
}

/// State bus over the global config, polling at the configured interval
pub(crate) async fn state_bus() -> Result<Arc<StateBus>> {
    let config = crate::global_config();
    Ok(Arc::new(StateBus::from_options(config.options.clone()).await?))
}

/// Client without credentials (login)
pub(crate) async fn anonymous_client() -> Result<MarketClient> {
    let config = crate::global_config();
    let base_url = config.options.get_string(api_keys::BASE_URL).await?;
    Ok(MarketClient::new(base_url, None))
}

/// Client for the current session, or an actionable error when logged out
pub(crate) async fn session_client(bus: &Arc<StateBus>) -> Result<(MarketClient, Session)> {
    let sessions = SessionStore::new(bus.clone());
    let session = sessions
        .current()
        .await
        .ok_or_else(|| anyhow::anyhow!("Not logged in. Run 'hearth-cli auth login' first."))?;

    let config = crate::global_config();
    let base_url = config.options.get_string(api_keys::BASE_URL).await?;
    let client = MarketClient::new(base_url, Some(session.token.clone()));
    Ok((client, session))
}
