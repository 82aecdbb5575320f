//! Repository error model.

use thiserror::Error;

use crate::FederationId;

/// Result type returned by repository write operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure reported by a storage backend.
///
/// Absence on reads is not an error; `get` returns `None` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A federation with the same identifier is already stored.
    #[error("federation {0} already exists")]
    AlreadyExists(FederationId),

    /// No federation is stored under the identifier.
    #[error("federation {0} not found")]
    NotFound(FederationId),

    /// The backend could not be initialized or reached.
    #[error("{0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
