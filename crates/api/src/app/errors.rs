use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use usermgmt_core::DomainError;
use usermgmt_infra::StoreError;

/// Client-facing message for every unhandled fault.
pub const UNEXPECTED_ERROR: &str = "unexpected error";

/// JSON error body: `{statusCode, message}`, plus `details` for faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error returned by handlers and extractors.
///
/// `Domain` errors are ordinary outcomes (400/404/409). `Fault` is anything
/// that escaped handler logic; it is reported by the fault-handling stage of
/// the middleware pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { kind, key } => DomainError::conflict(format!(
                "A {kind} with the key '{key}' already exists."
            ))
            .into(),
            StoreError::NotFound { kind, key } => DomainError::missing(kind, key).into(),
            err @ StoreError::Poisoned { .. } => Self::Fault(err.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(err) => domain_error_to_response(&err),
            ApiError::Fault(err) => fault_to_response(&err),
        }
    }
}

/// Fault captured downstream, attached to the response for the fault stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultReport {
    /// One-line cause chain, sent to the client as `details`.
    pub summary: String,
    /// Full debug rendering (backtrace when captured), server-side only.
    pub detail: String,
}

pub fn domain_error_to_response(err: &DomainError) -> Response {
    let status = match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    json_error(status, err.message())
}

/// Bare 500 carrying a [`FaultReport`] in its extensions.
fn fault_to_response(err: &anyhow::Error) -> Response {
    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response.extensions_mut().insert(FaultReport {
        summary: format!("{err:#}"),
        detail: format!("{err:?}"),
    });
    response
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        status_code: status.as_u16(),
        message: message.into(),
        details: None,
    };
    (status, axum::Json(body)).into_response()
}

/// The uniform 500 body sent for any unhandled fault.
pub fn unexpected_error(details: impl Into<String>) -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let body = ErrorBody {
        status_code: status.as_u16(),
        message: UNEXPECTED_ERROR.to_string(),
        details: Some(details.into()),
    };
    (status, axum::Json(body)).into_response()
}
