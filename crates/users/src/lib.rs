//! Users domain module.
//!
//! This crate contains the user record and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod user;

pub use user::{User, validate_user};
