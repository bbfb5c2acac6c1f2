//! Cached authenticated-user record
//!
//! The session marker lives in the options store under the `session.*` keys
//! (empty string = absent) and every write goes through the state bus, so
//! login and logout propagate to subscribers like any other key update.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::bus::StateBus;
use crate::config::options::registrations::session as keys;

/// Role classifier attached to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a role string; unknown classifiers degrade to `User`
    pub fn parse(raw: &str) -> Role {
        match raw {
            "admin" => Role::Admin,
            "user" => Role::User,
            other => {
                log::warn!("Unknown role '{}', treating as user", other);
                Role::User
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence that a user is authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Reads and writes the persisted session marker
pub struct SessionStore {
    bus: Arc<StateBus>,
}

impl SessionStore {
    pub fn new(bus: Arc<StateBus>) -> Self {
        Self { bus }
    }

    /// Current session, or None when absent or expired.
    ///
    /// Expiry detection destroys the stored marker, so a stale record is
    /// reported as logged-out exactly once and then gone.
    pub async fn current(&self) -> Option<Session> {
        let user_id = match self.bus.get_string(keys::USER_ID).await {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Failed to read session: {:#}", e);
                return None;
            }
        };
        if user_id.is_empty() {
            return None;
        }

        let role = Role::parse(self.bus.get_string(keys::ROLE).await.ok()?.as_str());
        let token = self.bus.get_string(keys::TOKEN).await.ok()?;

        let expires_raw = self.bus.get_string(keys::EXPIRES_AT).await.ok()?;
        let expires_at = if expires_raw.is_empty() {
            None
        } else {
            match DateTime::parse_from_rfc3339(&expires_raw) {
                Ok(at) => Some(at.with_timezone(&Utc)),
                Err(e) => {
                    log::warn!("Stored session expiry is malformed ({}); ignoring", e);
                    None
                }
            }
        };

        let session = Session {
            user_id,
            role,
            token,
            expires_at,
        };

        if session.is_expired(Utc::now()) {
            log::info!("Session for '{}' expired, clearing", session.user_id);
            if let Err(e) = self.clear().await {
                log::warn!("Failed to clear expired session: {:#}", e);
            }
            return None;
        }

        Some(session)
    }

    /// Persist a session marker (created on successful authentication)
    pub async fn store(&self, session: &Session) -> Result<()> {
        self.bus
            .set_string(keys::USER_ID, session.user_id.clone())
            .await?;
        self.bus
            .set_string(keys::ROLE, session.role.as_str().to_string())
            .await?;
        self.bus
            .set_string(keys::TOKEN, session.token.clone())
            .await?;
        let expires = session
            .expires_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default();
        self.bus.set_string(keys::EXPIRES_AT, expires).await?;
        Ok(())
    }

    /// Destroy the session marker (explicit logout)
    pub async fn clear(&self) -> Result<()> {
        for key in [keys::USER_ID, keys::ROLE, keys::TOKEN, keys::EXPIRES_AT] {
            self.bus.set_string(key, String::new()).await?;
        }
        Ok(())
    }
}
