//! Notification endpoints and the opportunistic unread-count refresh

use anyhow::Result;
use uuid::Uuid;

use super::client::MarketClient;
use super::models::{Notification, UnreadCount};
use crate::bus::StateBus;
use crate::config::options::registrations::notify;

impl MarketClient {
    /// List the user's notifications, optionally only unread ones
    pub async fn list_notifications(&self, unread_only: bool) -> Result<Vec<Notification>> {
        let path = if unread_only {
            "/api/notifications?unread=true"
        } else {
            "/api/notifications"
        };
        self.get_json(path).await
    }

    /// Number of unread notifications
    pub async fn unread_count(&self) -> Result<u64> {
        let count: UnreadCount = self.get_json("/api/notifications/unread-count").await?;
        Ok(count.unread)
    }

    /// Mark a single notification as read
    pub async fn mark_read(&self, id: Uuid) -> Result<()> {
        self.post_empty(&format!("/api/notifications/{}/read", id))
            .await
    }

    /// Mark every notification as read
    pub async fn mark_all_read(&self) -> Result<()> {
        self.post_empty("/api/notifications/read-all").await
    }

    /// Delete a notification
    pub async fn delete_notification(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/notifications/{}", id)).await
    }
}

/// Refresh the persisted unread counter from the backend.
///
/// Network failures leave the last-known value in place; the next natural
/// trigger (another command, a poll tick, a remount) is the only retry.
pub async fn refresh_unread(client: &MarketClient, bus: &StateBus) {
    match client.unread_count().await {
        Ok(count) => {
            if let Err(e) = bus.set_uint(notify::UNREAD, count).await {
                log::warn!("Failed to store unread count: {:#}", e);
            }
        }
        Err(e) => {
            log::warn!(
                "Failed to refresh unread count ({:#}); keeping last known value",
                e
            );
        }
    }
}
