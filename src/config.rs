//! Call-context configuration.
//!
//! ```toml
//! initial_capacity = 64
//! shard_amount = 16
//! trace_operations = false
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a [`CallContext`](crate::CallContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallContextConfig {
    /// Number of slot names to pre-allocate room for
    pub initial_capacity: usize,

    /// Registry shard count. Power of two greater than 1; `None` picks the
    /// DashMap default.
    pub shard_amount: Option<usize>,

    /// Emit a `trace` event for every set, get and free
    pub trace_operations: bool,
}

impl Default for CallContextConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            shard_amount: None,
            trace_operations: false,
        }
    }
}

impl CallContextConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can build a registry.
    pub fn validate(&self) -> Result<()> {
        match self.shard_amount {
            Some(n) if n < 2 || !n.is_power_of_two() => Err(Error::Config(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                n
            ))),
            _ => Ok(()),
        }
    }
}
