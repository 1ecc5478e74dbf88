//! Tower layers applied around the whole router.
//!
//! Response decoration for individual routes lives in [`super::decorator`];
//! this module only covers request tracing and timeout enforcement.

use std::time::Duration;

use axum::http::Request;
use tracing::{info_span, Span};
use uuid::Uuid;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Root span for one request, tagged with a fresh request id.
///
/// Only the method and path are recorded; bodies never reach the logs.
pub fn request_span<B>(req: &Request<B>) -> Span {
    info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %Uuid::new_v4(),
    )
}
