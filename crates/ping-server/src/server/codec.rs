//! JSON request decoding and response encoding.
//!
//! [`decode`] takes ownership of the request body, so the body stream is read
//! and released exactly once whichever way decoding ends. [`encode`] never sets
//! a `Content-Type`; that belongs to the decorator chain.

use axum::{
    body::{to_bytes, Body},
    http::StatusCode,
    response::Response,
};
use bytes::Bytes;
use common::RequestError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Read the whole `body` (at most `limit` bytes) and parse it as JSON.
///
/// # Errors
///
/// [`RequestError::BodyRead`] if the body cannot be read or exceeds `limit`,
/// [`RequestError::Decode`] if the bytes are not valid JSON for `T`.
pub async fn decode<T: DeserializeOwned>(body: Body, limit: usize) -> Result<T, RequestError> {
    let bytes: Bytes = to_bytes(body, limit)
        .await
        .map_err(|e| RequestError::BodyRead(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| RequestError::Decode(e.to_string()))
}

/// Serialise `value` as the JSON response body, followed by a newline.
///
/// If serialisation fails the response degrades to `500` with a plain-text
/// diagnostic instead of JSON.
pub fn encode<T: Serialize>(value: &T, status: StatusCode) -> Response {
    match serde_json::to_vec(value) {
        Ok(mut json) => {
            json.push(b'\n');
            with_status(Body::from(json), status)
        }
        Err(e) => {
            let err = RequestError::Encode(e.to_string());
            error!(error = %err, "response serialisation failed");
            with_status(Body::from(err.to_string()), StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn with_status(body: Body, status: StatusCode) -> Response {
    let mut res = Response::new(body);
    *res.status_mut() = status;
    res
}
