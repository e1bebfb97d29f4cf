//! Suite error types.

use thiserror::Error;

/// Errors raised while resolving suite operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiteError {
    #[error("unknown operation '{name}'")]
    UnknownOperation { name: String },
}

impl SuiteError {
    /// Create an unknown operation error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }
}

/// Result type for suite operations.
pub type Result<T> = std::result::Result<T, SuiteError>;
