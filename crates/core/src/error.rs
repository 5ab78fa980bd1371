//! Domain error model.

use thiserror::Error;

use crate::validate::FieldErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Validation and guard failures are recoverable at the service boundary and
/// carry user-facing detail. Storage and repository failures are fatal to the
/// enclosing operation and propagate uncaught.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more field constraints were violated. No side effects occurred.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// A referenced entity id did not resolve.
    #[error("not found")]
    NotFound,

    /// A business rule blocked the mutation before anything changed.
    #[error("{0}")]
    Guard(String),

    /// The file store failed a `put`. Delete failures are best-effort and are
    /// never surfaced through this variant.
    #[error("storage failure: {0}")]
    Storage(String),

    /// The persistence backend failed.
    #[error("repository failure: {0}")]
    Repository(String),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn guard(msg: impl Into<String>) -> Self {
        Self::Guard(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Field-level error report, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Persistence backend failure, raised by repository implementations.
///
/// Kept deliberately opaque: the domain layer does not retry or branch on
/// backend detail, it only propagates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("backend failure: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Backend(msg) => DomainError::Repository(msg),
        }
    }
}
