//! Global registry for option definitions

use super::types::OptionDefinition;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe registry of option definitions
pub struct OptionsRegistry {
    definitions: RwLock<HashMap<String, OptionDefinition>>,
}

impl OptionsRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            definitions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new option definition
    ///
    /// Returns an error if an option with the same key is already registered
    pub fn register(&self, def: OptionDefinition) -> Result<()> {
        let mut defs = self.definitions.write().unwrap();
        if defs.contains_key(&def.key) {
            anyhow::bail!("Option '{}' is already registered", def.key);
        }
        log::debug!("Registered option: {} ({})", def.key, def.display_name);
        defs.insert(def.key.clone(), def);
        Ok(())
    }

    /// Get option definition by full key
    pub fn get(&self, key: &str) -> Option<OptionDefinition> {
        self.definitions.read().unwrap().get(key).cloned()
    }

    /// Check if an option is registered
    pub fn contains(&self, key: &str) -> bool {
        self.definitions.read().unwrap().contains_key(key)
    }

    /// List all options in a namespace, sorted by key
    pub fn list_namespace(&self, namespace: &str) -> Vec<OptionDefinition> {
        let defs = self.definitions.read().unwrap();
        let mut options: Vec<_> = defs
            .values()
            .filter(|def| def.namespace == namespace)
            .cloned()
            .collect();

        options.sort_by(|a, b| a.key.cmp(&b.key));
        options
    }

    /// Get all unique namespaces
    pub fn namespaces(&self) -> Vec<String> {
        let defs = self.definitions.read().unwrap();
        let mut namespaces: Vec<_> = defs.values().map(|def| def.namespace.clone()).collect();

        namespaces.sort();
        namespaces.dedup();
        namespaces
    }
}

impl Default for OptionsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
