//! Domain error model.

use thiserror::Error;

/// Result type used across the domain and storage layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `Validation` and `NotFound` are client-facing outcomes. `Data` covers
/// storage constraint violations and broken preconditions; it is never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Client input was malformed or missing a required field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier did not resolve to a stored row.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage-layer failure or violated precondition.
    #[error("data error: {0}")]
    Data(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
