//! Request and response types for the public HTTPS API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ping endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingRequest {
    /// Arbitrary text echoed back in the response message.
    pub value: String,
}

/// Response body for `POST /ping`, used for both success and failure.
///
/// Exactly one field is non-empty: `message` on success, `error` on failure.
/// Both fields are always serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
    pub error: String,
}

impl PingResponse {
    /// Successful response carrying `message`.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: String::new(),
        }
    }

    /// Failed response carrying `error`.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            message: String::new(),
            error: error.into(),
        }
    }
}
