//! Axum router construction.

use std::{sync::Arc, time::Duration};

use axum::{extract::Request, routing::post, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{
    decorator::{add_json_header, decorate},
    handlers::{self, PING_ROUTE},
    middleware,
    state::Dependencies,
};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// Each route gets its decorator chain here, at registration time.
pub fn build(deps: Dependencies, request_timeout: Duration) -> Router {
    let ping = decorate(handlers::ping(Arc::new(deps)), [add_json_header()]);
    let not_found = decorate(handlers::not_found(), [add_json_header()]);

    Router::new()
        .route(PING_ROUTE, post(move |req: Request| ping.call(req)))
        .fallback(move |req: Request| not_found.call(req))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span))
}
