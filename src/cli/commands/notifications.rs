//! Notification operations against the backend

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use uuid::Uuid;

use crate::api::refresh_unread;
use crate::cli::{session_client, state_bus, ui};
use crate::config::options::registrations::notify;

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications (unread only by default)
    List {
        /// Include notifications already read
        #[arg(long)]
        all: bool,
    },
    /// Mark one notification as read
    Read { id: Uuid },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Delete { id: Uuid },
}

pub async fn notifications_command(cmd: NotificationCommands) -> Result<()> {
    let bus = state_bus().await?;
    let (client, _session) = session_client(&bus).await?;

    match cmd {
        NotificationCommands::List { all } => {
            let notifications = client.list_notifications(!all).await?;

            ui::header("Hearth Notifications");
            println!();
            if notifications.is_empty() {
                println!("  {}", "Nothing here".dimmed());
            }
            for n in &notifications {
                let marker = if n.read {
                    "○".dimmed()
                } else {
                    "●".bright_green()
                };
                println!(
                    "  {} {}  {}",
                    marker,
                    n.title.bright_white().bold(),
                    n.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
                );
                println!("    {}", n.body);
                println!("    {}", n.id.to_string().dimmed());
            }
        }
        NotificationCommands::Read { id } => {
            client.mark_read(id).await?;
            println!("  {} Marked {} as read", "✓".bright_green(), id);
        }
        NotificationCommands::ReadAll => {
            client.mark_all_read().await?;
            println!("  {} Marked all notifications as read", "✓".bright_green());
        }
        NotificationCommands::Delete { id } => {
            client.delete_notification(id).await?;
            println!("  {} Deleted {}", "✓".bright_green(), id);
        }
    }

    // Every mutation (and the list itself) refreshes the badge
    refresh_unread(&client, &bus).await;
    let unread = bus.get_uint(notify::UNREAD).await?;
    println!();
    println!("  {} unread", unread.to_string().bright_yellow().bold());
    Ok(())
}
