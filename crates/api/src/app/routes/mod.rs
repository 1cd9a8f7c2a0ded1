use axum::{Router, routing::get};

pub mod blogs;
pub mod common;
pub mod system;
pub mod users;

/// Router for every endpoint. All of them sit behind the token stage.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::welcome))
        .nest("/users", users::router())
        .nest("/blogs", blogs::router())
}
