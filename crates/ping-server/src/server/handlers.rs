//! Request handlers for the service endpoints.

use std::sync::Arc;

use axum::{extract::Request, http::StatusCode};
use common::{error::EMPTY_VALUE_MESSAGE, PingRequest, PingResponse, RequestError};
use tracing::debug;

use super::{codec, decorator::Handler, state::Dependencies};

/// Path of the ping endpoint.
pub const PING_ROUTE: &str = "/ping";

/// `POST /ping`: echo the request value together with the configured message.
///
/// Decode and validation failures answer `400` with the cause in `error`.
pub fn ping(deps: Arc<Dependencies>) -> Handler {
    Handler::new(move |req: Request| {
        let deps = Arc::clone(&deps);
        async move {
            match answer_ping(req, &deps).await {
                Ok(res) => codec::encode(&res, StatusCode::OK),
                Err(e) => {
                    debug!(kind = e.kind(), error = %e, "ping request rejected");
                    codec::encode(&PingResponse::failure(e.to_string()), status_of(&e))
                }
            }
        }
    })
}

/// Catch-all 404 handler.
pub fn not_found() -> Handler {
    Handler::new(|_req: Request| async {
        codec::encode(&PingResponse::failure("not found"), StatusCode::NOT_FOUND)
    })
}

async fn answer_ping(req: Request, deps: &Dependencies) -> Result<PingResponse, RequestError> {
    let ping: PingRequest = codec::decode(req.into_body(), deps.max_body_bytes).await?;
    validate(&ping)?;
    debug!(value_len = ping.value.len(), "ping accepted");

    Ok(PingResponse::ok(format!(
        "request: {}; response: {}",
        ping.value, deps.ping_response_message
    )))
}

fn validate(ping: &PingRequest) -> Result<(), RequestError> {
    if ping.value.is_empty() {
        return Err(RequestError::Validation(EMPTY_VALUE_MESSAGE.into()));
    }
    Ok(())
}

fn status_of(err: &RequestError) -> StatusCode {
    StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
