//! SQLite-based configuration module for Hearth CLI
//!
//! This module provides persistent storage for:
//! - The options system for type-safe key-value settings (preferences,
//!   counters, cached session fields)
//! - Schema migrations for the config database

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

pub mod db;
pub mod options;

/// Main configuration manager using SQLite backend
pub struct Config {
    pub(crate) pool: sqlx::SqlitePool,
    config_path: PathBuf,

    /// Options system for type-safe settings
    pub options: Arc<options::Options>,
}

impl Config {
    /// Get the path to the SQLite database file
    pub fn get_db_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("hearth-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".hearth-cli")
        };

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            log::info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.db"))
    }

    /// Load configuration from the SQLite database
    pub async fn load() -> Result<Self> {
        let db_path = Self::get_db_path()?;
        log::debug!("Loading config from: {:?}", db_path);

        let pool = db::connect(&db_path).await?;
        db::run_migrations(&pool).await?;

        let options = Arc::new(options::Options::new(pool.clone(), crate::options_registry()));

        Ok(Self {
            pool,
            config_path: db_path,
            options,
        })
    }

    /// Create a new config for testing (in-memory database)
    pub async fn new_test() -> Result<Self> {
        let pool = db::connect_memory().await?;
        db::run_migrations(&pool).await?;

        // Isolated registry so tests don't depend on process-global state
        let test_registry = Arc::new(options::OptionsRegistry::new());
        options::registrations::register_all(&test_registry)?;
        let options = Arc::new(options::Options::new(pool.clone(), test_registry));

        Ok(Self {
            pool,
            config_path: PathBuf::from(":memory:"),
            options,
        })
    }

    /// Path of the backing database file
    pub fn path(&self) -> &std::path::Path {
        &self.config_path
    }
}
