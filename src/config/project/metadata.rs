//! Metadata entries: `key=value`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// One metadata entry; duplicate keys are kept in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse `key=value`; the value is kept verbatim and may be empty
    pub fn parse(input: &str) -> Result<Self> {
        let (key, value) = input.split_once('=').ok_or_else(|| {
            config::invalid(format!("metadata entry '{}' must be key=value", input))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(config::invalid(format!(
                "metadata entry '{}' has an empty key",
                input
            )));
        }

        Ok(Self::new(key, value))
    }
}

impl fmt::Display for MetadataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
