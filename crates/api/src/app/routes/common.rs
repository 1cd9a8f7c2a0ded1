use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

use crate::app::errors::ApiError;

/// Characters escaped when a key is placed into a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `/{collection}/{key}` with the key percent-encoded.
pub fn location(collection: &str, key: &str) -> String {
    format!("/{collection}/{}", utf8_percent_encode(key, PATH_SEGMENT))
}

/// 201 with a `Location` header and the created record as JSON.
pub fn created<T: Serialize>(location: &str, body: &T) -> Result<Response, ApiError> {
    let location = HeaderValue::from_str(location).map_err(anyhow::Error::from)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_leaves_plain_keys_alone() {
        assert_eq!(location("users", "alice"), "/users/alice");
    }

    #[test]
    fn location_escapes_reserved_and_non_ascii() {
        assert_eq!(location("blogs", "First Blog"), "/blogs/First%20Blog");
        assert_eq!(location("blogs", "a/b?c"), "/blogs/a%2Fb%3Fc");
        assert_eq!(location("users", "zoë"), "/users/zo%C3%AB");
    }
}
