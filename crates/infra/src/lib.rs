//! Infrastructure layer: storage backends and fault injection.

pub mod fault;
pub mod repository;

pub use fault::{AlwaysFail, NoFaults, RandomFaults, SetupFault};
pub use repository::InMemoryFederationRepository;
