//! Unified error types for callctx.
//!
//! The three core operations never fail: reading an unknown or freed slot is
//! `None`. Errors only come from typed access, spawning without a runtime,
//! and configuration.

use thiserror::Error;

/// All callctx errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A slot value was requested as a different type than it was stored with
    #[error("wrong type for slot '{name}': expected {expected}, got {actual}")]
    WrongType {
        /// Slot name
        name: String,
        /// Type requested by the caller
        expected: &'static str,
        /// Type the value was stored as
        actual: &'static str,
    },

    /// A task was spawned outside a Tokio runtime
    #[error("no Tokio runtime is running on this thread")]
    NoRuntime,

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for callctx operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a type mismatch.
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Attach a slot name to a core type-mismatch error.
    pub(crate) fn for_slot(name: &str, e: callctx_core::Error) -> Self {
        match e {
            callctx_core::Error::WrongType { expected, actual } => Error::WrongType {
                name: name.to_string(),
                expected,
                actual,
            },
            other => other.into(),
        }
    }
}

// Convert from internal core errors
impl From<callctx_core::Error> for Error {
    fn from(e: callctx_core::Error) -> Self {
        use callctx_core::Error as CoreError;
        match e {
            CoreError::WrongType { expected, actual } => Error::WrongType {
                name: String::new(),
                expected,
                actual,
            },
            CoreError::InvalidConfig(msg) => Error::Config(msg),
        }
    }
}

impl From<tokio::runtime::TryCurrentError> for Error {
    fn from(_: tokio::runtime::TryCurrentError) -> Self {
        Error::NoRuntime
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
