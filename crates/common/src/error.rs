//! Per-request error types shared across crates.

use thiserror::Error;

/// Message returned when a ping request carries an empty `value`.
pub const EMPTY_VALUE_MESSAGE: &str = "ping request value must be at least 1 char";

/// Everything that can go wrong while handling a single request.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`RequestError::BodyRead`] → 400
/// - [`RequestError::Decode`] → 400
/// - [`RequestError::Validation`] → 400
/// - [`RequestError::Encode`] → 500
///
/// `BodyRead` and `Decode` share a status code but stay separate so that a
/// transport failure is never mistaken for bad client input in logs.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body could not be fully read from the connection.
    #[error("unable to read request body. {0}")]
    BodyRead(String),

    /// The body was read but is not valid JSON for the expected shape.
    #[error("unable to unmarshal request body. {0}")]
    Decode(String),

    /// The payload decoded but breaks a domain rule.
    #[error("{0}")]
    Validation(String),

    /// The response value could not be serialised.
    #[error("unable to marshal response. {0}")]
    Encode(String),
}

impl RequestError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            RequestError::BodyRead(_) => 400,
            RequestError::Decode(_) => 400,
            RequestError::Validation(_) => 400,
            RequestError::Encode(_) => 500,
        }
    }

    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::BodyRead(_) => "body_read",
            RequestError::Decode(_) => "decode",
            RequestError::Validation(_) => "validation",
            RequestError::Encode(_) => "encode",
        }
    }
}
