//! `usermgmt-auth` — credential checking boundary.
//!
//! This crate is intentionally decoupled from HTTP: it only answers whether a
//! presented token is acceptable.

pub mod token;

pub use token::{DEFAULT_TOKEN, StaticTokenValidator, TokenError, TokenValidator};
