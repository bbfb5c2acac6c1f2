//! Database-backed storage for options with validation
//!
//! Missing rows fall back to the registered default. Malformed rows also
//! fall back to the default (with a warning) rather than erroring, so a
//! corrupt entry can never wedge a reader.

use super::registry::OptionsRegistry;
use super::types::{OptionType, OptionValue};
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Database-backed options store with type validation
pub struct Options {
    pool: SqlitePool,
    registry: Arc<OptionsRegistry>,
}

impl Options {
    /// Create a new options store
    pub fn new(pool: SqlitePool, registry: Arc<OptionsRegistry>) -> Self {
        Self { pool, registry }
    }

    /// Get a reference to the options registry
    pub fn registry(&self) -> &OptionsRegistry {
        &self.registry
    }

    /// Get option value with type checking and default fallback
    pub async fn get(&self, key: &str) -> Result<OptionValue> {
        let def = self
            .registry
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("Option '{}' is not registered", key))?;

        match self.get_raw(key).await? {
            Some(raw) => match parse_value(&raw, &def.ty) {
                Ok(value) => Ok(value),
                Err(e) => {
                    log::warn!(
                        "Stored value for '{}' is malformed ({:#}); using default",
                        key,
                        e
                    );
                    Ok(def.default.clone())
                }
            },
            None => Ok(def.default.clone()),
        }
    }

    /// Get the string encoding of an option value (as persisted/broadcast)
    pub async fn get_encoded(&self, key: &str) -> Result<String> {
        Ok(self.get(key).await?.encode())
    }

    /// Set option value with validation
    pub async fn set(&self, key: &str, value: OptionValue) -> Result<()> {
        let def = self
            .registry
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("Option '{}' is not registered", key))?;

        def.validate(&value)?;

        self.set_raw(key, &value.encode()).await
    }

    /// Get bool value
    pub async fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key).await?.as_bool()
    }

    /// Get uint value
    pub async fn get_uint(&self, key: &str) -> Result<u64> {
        self.get(key).await?.as_uint()
    }

    /// Get string value
    pub async fn get_string(&self, key: &str) -> Result<String> {
        self.get(key).await?.as_string()
    }

    /// Set bool value
    pub async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, OptionValue::Bool(value)).await
    }

    /// Set uint value
    pub async fn set_uint(&self, key: &str, value: u64) -> Result<()> {
        self.set(key, OptionValue::UInt(value)).await
    }

    /// Set string value
    pub async fn set_string(&self, key: &str, value: String) -> Result<()> {
        self.set(key, OptionValue::String(value)).await
    }

    /// Delete an option by key, reverting reads to the default
    pub async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM options WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .context("Failed to delete option")?;
        Ok(())
    }

    /// Get raw value from database
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT value FROM options WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get option from database")
    }

    /// Set raw value in database
    async fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO options (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = ?, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .bind(value)
        .execute(&self.pool)
        .await
        .context("Failed to set option in database")?;

        log::debug!("Set option: {} = {}", key, value);
        Ok(())
    }
}

/// Parse raw string value based on expected type
fn parse_value(raw: &str, ty: &OptionType) -> Result<OptionValue> {
    match ty {
        OptionType::Bool => {
            let value = raw.parse::<bool>().context("Failed to parse as bool")?;
            Ok(OptionValue::Bool(value))
        }
        OptionType::UInt { .. } => {
            let value = raw.parse::<u64>().context("Failed to parse as uint")?;
            Ok(OptionValue::UInt(value))
        }
        OptionType::String { .. } | OptionType::Enum { .. } => {
            Ok(OptionValue::String(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::OptionDefBuilder;

    async fn setup_test_store() -> (Options, Arc<OptionsRegistry>) {
        let pool = crate::config::db::connect_memory().await.unwrap();
        crate::config::db::run_migrations(&pool).await.unwrap();

        let registry = Arc::new(OptionsRegistry::new());
        let store = Options::new(pool, registry.clone());

        (store, registry)
    }

    #[tokio::test]
    async fn test_bool_roundtrip() {
        let (store, registry) = setup_test_store().await;

        registry
            .register(
                OptionDefBuilder::new("test", "bool")
                    .display_name("Test Bool")
                    .bool_type(false)
                    .build()
                    .unwrap(),
            )
            .unwrap();

        // Should return default
        assert!(!store.get_bool("test.bool").await.unwrap());

        // Set and retrieve
        store.set_bool("test.bool", true).await.unwrap();
        assert!(store.get_bool("test.bool").await.unwrap());
    }

    #[tokio::test]
    async fn test_uint_validation() {
        let (store, registry) = setup_test_store().await;

        registry
            .register(
                OptionDefBuilder::new("test", "uint")
                    .display_name("Test UInt")
                    .uint_type(5, Some(1), Some(10))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        store.set_uint("test.uint", 7).await.unwrap();
        assert_eq!(store.get_uint("test.uint").await.unwrap(), 7);

        // Should reject value below min
        assert!(store.set_uint("test.uint", 0).await.is_err());

        // Should reject value above max
        assert!(store.set_uint("test.uint", 11).await.is_err());
    }

    #[tokio::test]
    async fn test_enum_validation() {
        let (store, registry) = setup_test_store().await;

        registry
            .register(
                OptionDefBuilder::new("test", "enum")
                    .display_name("Test Enum")
                    .enum_type(vec!["option1", "option2"], "option1")
                    .build()
                    .unwrap(),
            )
            .unwrap();

        store
            .set_string("test.enum", "option2".to_string())
            .await
            .unwrap();
        assert_eq!(store.get_string("test.enum").await.unwrap(), "option2");

        // Should reject invalid variant
        assert!(
            store
                .set_string("test.enum", "invalid".to_string())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_malformed_value_falls_back_to_default() {
        let (store, registry) = setup_test_store().await;

        registry
            .register(
                OptionDefBuilder::new("test", "count")
                    .display_name("Test Count")
                    .uint_type(3, None, None)
                    .build()
                    .unwrap(),
            )
            .unwrap();

        // Corrupt the stored row behind the store's back
        store.set_raw("test.count", "not-a-number").await.unwrap();

        assert_eq!(store.get_uint("test.count").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unregistered_key_is_an_error() {
        let (store, _registry) = setup_test_store().await;

        assert!(store.get("nope.missing").await.is_err());
        assert!(
            store
                .set("nope.missing", OptionValue::Bool(true))
                .await
                .is_err()
        );
    }
}
