//! Display preference options (theme, currency, browse category)

use crate::config::options::{OptionDefBuilder, OptionsRegistry};
use anyhow::Result;

/// Theme flag: light mode on/off
pub const LIGHT_MODE: &str = "appearance.light_mode";

/// Currency used when rendering listing prices
pub const CURRENCY: &str = "locale.currency";

/// Listing category last selected while browsing
pub const CATEGORY: &str = "browse.category";

/// Register all preference options
pub fn register(registry: &OptionsRegistry) -> Result<()> {
    registry.register(
        OptionDefBuilder::new("appearance", "light_mode")
            .display_name("Light Mode")
            .description("Render screens with the light color scheme")
            .bool_type(false)
            .build()?,
    )?;

    registry.register(
        OptionDefBuilder::new("locale", "currency")
            .display_name("Currency")
            .description("Currency used when displaying listing prices")
            .enum_type(vec!["usd", "eur", "gbp"], "usd")
            .build()?,
    )?;

    registry.register(
        OptionDefBuilder::new("browse", "category")
            .display_name("Listing Category")
            .description("Listing category selected on the browse screen")
            .enum_type(vec!["all", "house", "apartment", "condo", "land"], "all")
            .build()?,
    )?;

    Ok(())
}
