//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: store wiring shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per entity)
//! - `dto.rs`: request body decoding
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use usermgmt_auth::{StaticTokenValidator, TokenValidator};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    let services = services::build_services(config);
    let validator = Arc::new(StaticTokenValidator::new(config.api_token.clone()));
    build_router(services, validator)
}

/// Router over caller-provided stores and token validator, pipeline applied.
pub fn build_router(
    services: services::AppServices,
    validator: Arc<dyn TokenValidator>,
) -> Router {
    let routes = routes::router().layer(Extension(Arc::new(services)));
    middleware::apply_pipeline(routes, validator)
}
