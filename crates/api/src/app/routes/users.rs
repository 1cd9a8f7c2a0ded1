use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use usermgmt_core::{DomainError, Entity};
use usermgmt_users::{User, validate_user};

use crate::app::dto::{Key, Payload};
use crate::app::errors::ApiError;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Payload(user): Payload<User>,
) -> Result<Response, ApiError> {
    let existing = services.users.list()?;
    validate_user(&user, &existing)?;

    services.users.insert(user.clone())?;
    tracing::info!(user = %user, "user created");

    common::created(&common::location("users", &user.user_name), &user)
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(services.users.list()?))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Key { value: username, .. }: Key<User>,
) -> Result<Json<User>, ApiError> {
    match services.users.get(&username)? {
        Some(user) => Ok(Json(user)),
        None => Err(DomainError::missing(User::kind(), &username).into()),
    }
}

/// Replace age and email of an existing user.
///
/// The payload is validated against every other user, so keeping one's own
/// name or email is not a conflict. The stored name never changes.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Key { value: username, .. }: Key<User>,
    Payload(changes): Payload<User>,
) -> Result<Json<User>, ApiError> {
    if services.users.get(&username)?.is_none() {
        return Err(DomainError::missing(User::kind(), &username).into());
    }

    let others = services.users.others(&username)?;
    validate_user(&changes, &others)?;

    let updated = services
        .users
        .update(&username, &mut |user: &mut User| user.apply_update(&changes))?;
    tracing::info!(user = %updated, "user updated");

    Ok(Json(updated))
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Key { value: username, .. }: Key<User>,
) -> Result<Response, ApiError> {
    services.users.remove(&username)?;
    tracing::info!(user_name = %username, "user deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
