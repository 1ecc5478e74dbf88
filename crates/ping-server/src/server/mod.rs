//! HTTPS server, routing, and response decoration.
//!
//! # Responsibilities
//! - Decode and encode JSON bodies ([`codec`]).
//! - Compose per-route decorator chains ([`decorator`]).
//! - Answer `POST /ping` from injected [`state::Dependencies`] ([`handlers`]).
//! - Build the TLS listener and run the serve/shutdown lifecycle ([`lifecycle`]).

pub mod codec;
pub mod decorator;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tls;

#[cfg(test)]
pub(crate) mod testing;

pub use lifecycle::{Server, ServerState};
pub use state::Dependencies;
