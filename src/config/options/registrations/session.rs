//! Cached session identity fields
//!
//! An empty string means "absent"; presence of a user id is the session
//! marker the navigation guard checks.

use crate::config::options::{OptionDefBuilder, OptionsRegistry};
use anyhow::Result;

pub const USER_ID: &str = "session.user_id";
pub const ROLE: &str = "session.role";
pub const TOKEN: &str = "session.token";
pub const EXPIRES_AT: &str = "session.expires_at";

/// Register session identity options
pub fn register(registry: &OptionsRegistry) -> Result<()> {
    registry.register(
        OptionDefBuilder::new("session", "user_id")
            .display_name("User Id")
            .description("Identifier of the authenticated user, empty when logged out")
            .string_type("", None)
            .build()?,
    )?;

    registry.register(
        OptionDefBuilder::new("session", "role")
            .display_name("Role")
            .description("Role classifier of the authenticated user")
            .string_type("", Some(32))
            .build()?,
    )?;

    registry.register(
        OptionDefBuilder::new("session", "token")
            .display_name("Access Token")
            .description("Bearer token for the marketplace API")
            .string_type("", None)
            .build()?,
    )?;

    registry.register(
        OptionDefBuilder::new("session", "expires_at")
            .display_name("Session Expiry")
            .description("RFC 3339 timestamp after which the session is stale")
            .string_type("", Some(64))
            .build()?,
    )?;

    Ok(())
}
