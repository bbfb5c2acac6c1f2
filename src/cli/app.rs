use clap::{Parser, Subcommand};

use super::commands::auth::AuthCommands;
use super::commands::listings::ListingsCommands;
use super::commands::notifications::NotificationCommands;
use super::commands::prefs::PrefsCommands;

#[derive(Parser)]
#[command(name = "hearth-cli")]
#[command(about = "A command-line client for the Hearth real-estate marketplace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication management
    #[command(subcommand)]
    Auth(AuthCommands),
    /// Preference management (theme, currency, category)
    #[command(subcommand)]
    Prefs(PrefsCommands),
    /// Notification management
    #[command(subcommand)]
    Notifications(NotificationCommands),
    /// Browse marketplace listings
    #[command(subcommand)]
    Listings(ListingsCommands),
    /// Interactive navigation shell
    Shell,
}
