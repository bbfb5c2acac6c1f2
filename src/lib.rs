pub mod api;
pub mod bus;
pub mod cli;
pub mod config;
pub mod nav;
pub mod session;

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;

use config::options::OptionsRegistry;

// Global Config instance
static CONFIG: OnceCell<config::Config> = OnceCell::new();

/// Get a reference to the global Config
pub fn global_config() -> &'static config::Config {
    CONFIG.get().expect("Config not initialized")
}

// Global Options Registry (wrapped in Arc for sharing)
static OPTIONS_REGISTRY: OnceCell<Arc<OptionsRegistry>> = OnceCell::new();

/// Get a reference to the global OptionsRegistry Arc, registering all
/// option definitions on first access.
pub fn options_registry() -> Arc<OptionsRegistry> {
    OPTIONS_REGISTRY
        .get_or_init(|| {
            let registry = Arc::new(OptionsRegistry::new());
            config::options::registrations::register_all(&registry)
                .expect("option definitions must be unique");
            registry
        })
        .clone()
}

/// Initialize the global Config (called once at startup)
pub async fn init() -> Result<()> {
    let config = config::Config::load().await?;
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;
    Ok(())
}
