//! Storage backends implementing `FederationRepository`.

pub mod in_memory;

pub use in_memory::InMemoryFederationRepository;
