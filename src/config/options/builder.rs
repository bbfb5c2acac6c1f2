//! Fluent builder API for creating option definitions

use super::types::{OptionDefinition, OptionType, OptionValue};
use anyhow::Result;

/// Builder for creating option definitions with a fluent API
pub struct OptionDefBuilder {
    namespace: String,
    local_key: String,
    display_name: Option<String>,
    description: Option<String>,
    ty: Option<OptionType>,
    default: Option<OptionValue>,
}

impl OptionDefBuilder {
    /// Create a new builder for an option in a namespace
    pub fn new(namespace: &str, local_key: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            local_key: local_key.to_string(),
            display_name: None,
            description: None,
            ty: None,
            default: None,
        }
    }

    /// Set the display name (human-readable label)
    pub fn display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    /// Set the description (help text)
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Define as a boolean type with default value
    pub fn bool_type(mut self, default: bool) -> Self {
        self.ty = Some(OptionType::Bool);
        self.default = Some(OptionValue::Bool(default));
        self
    }

    /// Define as an unsigned integer type with default and optional constraints
    pub fn uint_type(mut self, default: u64, min: Option<u64>, max: Option<u64>) -> Self {
        self.ty = Some(OptionType::UInt { min, max });
        self.default = Some(OptionValue::UInt(default));
        self
    }

    /// Define as a string type with default and optional max length
    pub fn string_type(mut self, default: &str, max_length: Option<usize>) -> Self {
        self.ty = Some(OptionType::String { max_length });
        self.default = Some(OptionValue::String(default.to_string()));
        self
    }

    /// Define as an enum type with allowed variants and default value
    pub fn enum_type(mut self, variants: Vec<&str>, default: &str) -> Self {
        self.ty = Some(OptionType::Enum {
            variants: variants.iter().map(|s| s.to_string()).collect(),
        });
        self.default = Some(OptionValue::String(default.to_string()));
        self
    }

    /// Build the option definition
    ///
    /// Returns an error if required fields are missing
    pub fn build(self) -> Result<OptionDefinition> {
        let display_name = self
            .display_name
            .ok_or_else(|| anyhow::anyhow!("display_name is required"))?;
        let ty = self
            .ty
            .ok_or_else(|| anyhow::anyhow!("type is required (use bool_type, uint_type, etc.)"))?;
        let default = self
            .default
            .ok_or_else(|| anyhow::anyhow!("default value is required"))?;

        let key = format!("{}.{}", self.namespace, self.local_key);

        Ok(OptionDefinition {
            key,
            namespace: self.namespace,
            local_key: self.local_key,
            display_name,
            description: self.description.unwrap_or_default(),
            ty,
            default,
        })
    }
}
