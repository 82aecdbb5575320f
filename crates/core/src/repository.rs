//! Storage contract consumed by the HTTP handlers.
//!
//! Backends are interchangeable behind `FederationRepository`; handlers never
//! see the concrete storage type.

use std::sync::Arc;

use crate::{Federation, FederationId, RepositoryResult};

/// Outcome of a successful write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// A new record was inserted.
    Created,
    /// An existing record was changed, or the write was a no-op.
    Ok,
}

/// Storage operations on federations.
///
/// Implementations must be safe to share between concurrent requests.
pub trait FederationRepository: Send + Sync {
    /// Backend initialization. Callers must not issue operations after a failure.
    fn setup(&self) -> RepositoryResult<()>;

    /// Insert a new federation. Fails with `AlreadyExists` on a duplicate id.
    fn add(&self, federation: Federation) -> RepositoryResult<WriteStatus>;

    /// Look up one federation; absence is `None`, never an error.
    fn get(&self, id: FederationId) -> Option<Federation>;

    /// All federations, ascending by identifier.
    fn list(&self) -> Vec<Federation>;

    /// Replace the owner of an existing federation. Fails with `NotFound`.
    fn update(&self, federation: Federation) -> RepositoryResult<WriteStatus>;

    /// Remove a federation. Removing an absent id still succeeds.
    fn delete(&self, id: FederationId) -> RepositoryResult<WriteStatus>;
}

impl<R> FederationRepository for Arc<R>
where
    R: FederationRepository + ?Sized,
{
    fn setup(&self) -> RepositoryResult<()> {
        (**self).setup()
    }

    fn add(&self, federation: Federation) -> RepositoryResult<WriteStatus> {
        (**self).add(federation)
    }

    fn get(&self, id: FederationId) -> Option<Federation> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Federation> {
        (**self).list()
    }

    fn update(&self, federation: Federation) -> RepositoryResult<WriteStatus> {
        (**self).update(federation)
    }

    fn delete(&self, id: FederationId) -> RepositoryResult<WriteStatus> {
        (**self).delete(id)
    }
}
