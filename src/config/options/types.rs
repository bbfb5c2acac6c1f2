//! Core types for the options system

use anyhow::Result;

/// A strongly-typed option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    UInt(u64),
    String(String),
}

impl OptionValue {
    /// Get as bool, returning error if wrong type
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            OptionValue::Bool(v) => Ok(*v),
            _ => anyhow::bail!("Expected Bool, got {:?}", self),
        }
    }

    /// Get as uint, returning error if wrong type
    pub fn as_uint(&self) -> Result<u64> {
        match self {
            OptionValue::UInt(v) => Ok(*v),
            _ => anyhow::bail!("Expected UInt, got {:?}", self),
        }
    }

    /// Get as string, returning error if wrong type
    pub fn as_string(&self) -> Result<String> {
        match self {
            OptionValue::String(v) => Ok(v.clone()),
            _ => anyhow::bail!("Expected String, got {:?}", self),
        }
    }

    /// String encoding used for database storage and bus broadcasts
    pub fn encode(&self) -> String {
        match self {
            OptionValue::Bool(v) => v.to_string(),
            OptionValue::UInt(v) => v.to_string(),
            OptionValue::String(v) => v.clone(),
        }
    }
}

/// Type definition with constraints for validation
#[derive(Debug, Clone)]
pub enum OptionType {
    Bool,
    UInt {
        min: Option<u64>,
        max: Option<u64>,
    },
    String {
        max_length: Option<usize>,
    },
    Enum {
        variants: Vec<String>,
    },
}

impl OptionType {
    /// Check if a value matches this type
    pub fn matches(&self, value: &OptionValue) -> bool {
        matches!(
            (self, value),
            (OptionType::Bool, OptionValue::Bool(_))
                | (OptionType::UInt { .. }, OptionValue::UInt(_))
                | (OptionType::String { .. }, OptionValue::String(_))
                | (OptionType::Enum { .. }, OptionValue::String(_))
        )
    }

    /// Validate that a value meets the constraints for this type
    pub fn validate(&self, value: &OptionValue) -> Result<()> {
        if !self.matches(value) {
            anyhow::bail!("Type mismatch: expected {:?}, got {:?}", self, value);
        }

        match (self, value) {
            (OptionType::UInt { min, max }, OptionValue::UInt(v)) => {
                if let Some(min) = min
                    && v < min
                {
                    anyhow::bail!("Value {} is below minimum {}", v, min);
                }
                if let Some(max) = max
                    && v > max
                {
                    anyhow::bail!("Value {} is above maximum {}", v, max);
                }
            }
            (OptionType::String { max_length }, OptionValue::String(v)) => {
                if let Some(max_length) = max_length
                    && v.len() > *max_length
                {
                    anyhow::bail!("String exceeds maximum length {}", max_length);
                }
            }
            (OptionType::Enum { variants }, OptionValue::String(v)) => {
                if !variants.contains(v) {
                    anyhow::bail!("'{}' is not one of: {}", v, variants.join(", "));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// Full definition of a registered option
#[derive(Debug, Clone)]
pub struct OptionDefinition {
    /// Full key: "namespace.local_key"
    pub key: String,
    pub namespace: String,
    pub local_key: String,
    /// Human-readable label
    pub display_name: String,
    /// Help text
    pub description: String,
    pub ty: OptionType,
    pub default: OptionValue,
}

impl OptionDefinition {
    /// Validate a value against this definition's type and constraints
    pub fn validate(&self, value: &OptionValue) -> Result<()> {
        self.ty.validate(value)
    }
}
