//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. These are
/// returned as ordinary results by handlers, never raised as faults.
/// The display text is the client-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A payload failed validation (missing fields, malformed values).
    #[error("{0}")]
    Validation(String),

    /// The payload collides with an existing record (duplicate unique field).
    #[error("{0}")]
    Conflict(String),

    /// A requested record was not found.
    #[error("{0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Standard "not found" error for an entity kind and key.
    pub fn missing(kind: &str, key: impl core::fmt::Display) -> Self {
        Self::NotFound(format!("No {kind} found with key '{key}'."))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg,
        }
    }
}
