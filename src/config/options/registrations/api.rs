//! API-related options registration

use crate::config::options::{OptionDefBuilder, OptionsRegistry};
use anyhow::Result;

/// Base URL of the Hearth marketplace backend
pub const BASE_URL: &str = "api.base_url";

/// Register all API-related options
pub fn register(registry: &OptionsRegistry) -> Result<()> {
    registry.register(
        OptionDefBuilder::new("api", "base_url")
            .display_name("API Base URL")
            .description("Base URL of the Hearth marketplace backend")
            .string_type("http://localhost:3000", None)
            .build()?,
    )?;

    Ok(())
}
