//! Notification and state-bus options

use crate::config::options::{OptionDefBuilder, OptionsRegistry};
use anyhow::Result;

/// Pending-notification count shown on the badge
pub const UNREAD: &str = "notify.unread";

/// Interval of the state bus polling fallback
pub const POLL_INTERVAL_MS: &str = "bus.poll_interval_ms";

/// Register notification and bus options
pub fn register(registry: &OptionsRegistry) -> Result<()> {
    registry.register(
        OptionDefBuilder::new("notify", "unread")
            .display_name("Unread Notifications")
            .description("Number of unread notifications, refreshed from the backend")
            .uint_type(0, None, None)
            .build()?,
    )?;

    registry.register(
        OptionDefBuilder::new("bus", "poll_interval_ms")
            .display_name("Bus Poll Interval (ms)")
            .description("How often subscribers re-check persisted values for out-of-band writes (100-60000)")
            .uint_type(1000, Some(100), Some(60000))
            .build()?,
    )?;

    Ok(())
}
