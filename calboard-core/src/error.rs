//! Error types for calboard.

use thiserror::Error;

/// Errors that can occur while setting up the pipeline.
///
/// Parsing itself never fails: malformed input degrades to defaults or
/// unschedulable events instead.
#[derive(Error, Debug)]
pub enum CalboardError {
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calboard operations.
pub type CalboardResult<T> = Result<T, CalboardError>;
