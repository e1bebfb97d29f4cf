//! Harness error types.
//!
//! Every failure aborts the run; there is nothing to roll back.

use collbench_suite::SuiteError;
use thiserror::Error;

/// Errors raised while configuring or running benchmarks.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("iteration time {0}ms exceeds maximum {1}ms")]
    IterationTimeTooLong(u128, u128),

    #[error("fork count {0} exceeds maximum {1}")]
    TooManyForks(u32, u32),

    #[error("invalid duration '{0}': expected a number followed by s, ms or us")]
    InvalidDuration(String),

    #[error("invalid include pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no operation matches '{0}'")]
    NoMatchingOperations(String),

    #[error(transparent)]
    Suite(#[from] SuiteError),

    #[error("failed to launch fork: {0}")]
    ForkSpawnFailed(String),

    #[error("fork {fork} of {operation} failed: {status}")]
    ForkFailed {
        operation: String,
        fork: u32,
        status: String,
    },

    #[error("malformed fork output: {0}")]
    MalformedForkOutput(String),

    #[error("fork {fork} of {operation} reported {actual} measurement iterations, expected {expected}")]
    MissingIterations {
        operation: String,
        fork: u32,
        expected: u32,
        actual: usize,
    },

    #[error("fork {fork} of '{operation}' completed no invocations in measurement iteration {index}")]
    EmptyIteration {
        operation: String,
        fork: u32,
        index: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
