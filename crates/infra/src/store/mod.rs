//! Entity storage abstractions.

pub mod entity_store;

pub use entity_store::{EntityStore, InMemoryStore, StoreError};
