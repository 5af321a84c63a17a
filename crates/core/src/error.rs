//! Core error types
//!
//! Reading an unknown slot is never an error; absence is reported as `None`.
//! Errors only arise from typed access and configuration.

use thiserror::Error;

/// Errors raised by the core layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A stored value was requested as a different type than it was stored with
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Type requested by the caller
        expected: &'static str,
        /// Type the value was stored as
        actual: &'static str,
    },

    /// Invalid configuration value
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a type mismatch.
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }
}
