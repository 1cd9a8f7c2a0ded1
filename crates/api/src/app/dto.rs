//! Request decoding.
//!
//! Users and blogs travel over the wire in their domain shape (`User`, `Blog`
//! serialize in camelCase), so no separate request DTOs exist. What lives here
//! are the extractors that keep rejections inside the JSON error contract: an
//! undecodable body becomes a fault, an undecodable key a plain 404.

use std::marker::PhantomData;

use anyhow::anyhow;
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use usermgmt_core::{DomainError, Entity};

use crate::app::errors::ApiError;

/// JSON request body.
///
/// Unlike `axum::Json`, a body that cannot be decoded (malformed JSON, wrong
/// field types, missing content type) is rejected as [`ApiError::Fault`] and
/// reported as a 500 by the fault-handling stage.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Fault(anyhow!(rejection.body_text()))),
        }
    }
}

/// Key of an `E` taken from the single path parameter of the route.
///
/// Stored keys are always valid UTF-8, so a segment that does not decode to
/// UTF-8 cannot name a record: it is answered as not found for `E`.
#[derive(Debug, Clone)]
pub struct Key<E> {
    pub value: String,
    entity: PhantomData<fn() -> E>,
}

impl<E> Key<E> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            entity: PhantomData,
        }
    }
}

#[axum::async_trait]
impl<S, E> FromRequestParts<S> for Key<E>
where
    E: Entity,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self::new(value)),
            Err(PathRejection::FailedToDeserializePathParams(rejection)) => {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                let key = percent_decode_str(raw).decode_utf8_lossy();
                tracing::debug!(kind = E::kind(), raw, reason = %rejection.body_text(), "undecodable key");
                Err(DomainError::missing(E::kind(), key).into())
            }
            Err(rejection) => Err(ApiError::Fault(anyhow!(rejection.body_text()))),
        }
    }
}
