//! `fedsvc-core` — domain foundation for the federation service.
//!
//! This crate contains **pure domain** primitives (no HTTP, no storage
//! backend): the `Federation` record, its identifier, and the repository
//! contract every storage backend implements.

pub mod error;
pub mod federation;
pub mod id;
pub mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use federation::Federation;
pub use id::{FederationId, IdParseError};
pub use repository::{FederationRepository, WriteStatus};
