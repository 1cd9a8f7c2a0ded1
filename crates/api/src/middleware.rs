//! Request pipeline: the ordered stages wrapped around every route.
//!
//! Outer to inner:
//! 1. [`log_request_response`] logs the request, then the finished response.
//! 2. [`handle_faults`] turns panics and [`FaultReport`]s into a uniform 500.
//! 3. [`validate_token`] rejects requests without an acceptable `Authorization`.
//!
//! Each stage receives the rest of the chain as `Next`. Only the token stage
//! may answer without calling it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;
use tower::ServiceBuilder;

use usermgmt_auth::{TokenError, TokenValidator};

use crate::app::errors::{self, FaultReport};

pub const MISSING_AUTHORIZATION: &str = "Authorization header is missing";
pub const INVALID_TOKEN: &str = "Invalid token";

const REDACTED: &str = "[redacted]";

#[derive(Clone)]
pub struct TokenState {
    pub validator: Arc<dyn TokenValidator>,
}

/// Wrap `router` in the three pipeline stages, in order.
pub fn apply_pipeline(router: Router, validator: Arc<dyn TokenValidator>) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(log_request_response))
            .layer(axum::middleware::from_fn(handle_faults))
            .layer(axum::middleware::from_fn_with_state(
                TokenState { validator },
                validate_token,
            )),
    )
}

/// Log method, path and headers; run the chain; log status and full body.
///
/// The `Authorization` value is replaced before logging.
///
/// The response goes out unchanged: the body is buffered only so it can be
/// logged, then handed back.
pub async fn log_request_response(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    tracing::info!(%method, %path, headers = ?redacted(req.headers()), "HTTP request");

    let response = next.run(req).await;

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(%method, %path, error = %e, "failed to buffer response body");
            return errors::unexpected_error(e.to_string());
        }
    };

    tracing::info!(
        %method,
        %path,
        status = parts.status.as_u16(),
        body = %String::from_utf8_lossy(&bytes),
        "HTTP response"
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Failure boundary for everything beneath it.
///
/// Catches a panic unwinding out of the inner stages, or a response carrying a
/// [`FaultReport`], logs it in full and replies with the uniform 500 body.
pub async fn handle_faults(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(mut response) => match response.extensions_mut().remove::<FaultReport>() {
            Some(report) => {
                tracing::error!(
                    %method,
                    %path,
                    error = %report.detail,
                    "An unhandled exception occurred while processing the request."
                );
                errors::unexpected_error(report.summary)
            }
            None => response,
        },
        Err(payload) => {
            let details = panic_message(&*payload);
            tracing::error!(
                %method,
                %path,
                panic = %details,
                "A panic occurred while processing the request."
            );
            errors::unexpected_error(details)
        }
    }
}

fn redacted(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    if headers.contains_key(header::AUTHORIZATION) {
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }
    headers
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Require an `Authorization` header the configured validator accepts.
pub async fn validate_token(
    State(state): State<TokenState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        tracing::warn!(path = %req.uri().path(), "Authorization header is missing.");
        return errors::json_error(StatusCode::UNAUTHORIZED, MISSING_AUTHORIZATION);
    };

    let verdict = value
        .to_str()
        .map_err(|_| TokenError::Unrecognised)
        .and_then(|token| state.validator.validate(token));

    if let Err(e) = verdict {
        tracing::warn!(path = %req.uri().path(), reason = %e, "Invalid token.");
        return errors::json_error(StatusCode::UNAUTHORIZED, INVALID_TOKEN);
    }

    next.run(req).await
}
