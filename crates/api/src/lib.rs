//! HTTP API: server, routing, middleware pipeline and request/response mapping.

pub mod app;
pub mod config;
pub mod middleware;
