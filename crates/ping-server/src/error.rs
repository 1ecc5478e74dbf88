//! Fatal server errors.

use std::{io, net::SocketAddr};

use thiserror::Error;

/// Errors that end [`crate::server::Server::serve`].
///
/// All of these are fatal and never retried. A shutdown requested through the
/// cancellation token is not an error and has no variant here.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration cannot be served (e.g. port `0`).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Certificate or private key missing, unreadable, or rejected by rustls.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The listener failed in a way that is not tied to a single connection.
    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),
}
