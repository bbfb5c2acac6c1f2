//! Registration of all application options

pub mod api;
pub mod notify;
pub mod prefs;
pub mod session;

use super::OptionsRegistry;
use anyhow::Result;

/// Register all options from all modules
pub fn register_all(registry: &OptionsRegistry) -> Result<()> {
    prefs::register(registry)?;
    notify::register(registry)?;
    session::register(registry)?;
    api::register(registry)?;
    Ok(())
}
