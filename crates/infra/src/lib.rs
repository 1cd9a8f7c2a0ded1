//! Infrastructure layer: record storage behind the `EntityStore` seam.

pub mod store;

pub use store::{EntityStore, InMemoryStore, StoreError};
