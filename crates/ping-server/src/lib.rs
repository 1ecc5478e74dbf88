//! `ping-server`: a small HTTPS service with a single JSON ping endpoint.
//!
//! The binary in `main.rs` wires configuration, telemetry, and OS signals to
//! [`server::Server`]; everything else lives in this library so it can be
//! embedded and tested without the process entry point.

pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;

pub use config::Config;
pub use error::ServerError;
pub use server::{Dependencies, Server, ServerState};
