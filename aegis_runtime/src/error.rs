//! Runtime errors

use thiserror::Error;

/// Runtime result type
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Runtime errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid telemetry: {field} {reason}")]
    InvalidTelemetry { field: &'static str, reason: String },

    #[error("mission is not locked onto a location")]
    NotLocked,

    #[error("mission session lock poisoned")]
    Poisoned,

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RuntimeError::InvalidTelemetry {
            field,
            reason: reason.into(),
        }
    }
}
