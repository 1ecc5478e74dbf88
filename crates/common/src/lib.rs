//! Common types, protocol definitions, and errors shared across `ping-svc` crates.

pub mod error;
pub mod protocol;

pub use error::RequestError;
pub use protocol::{PingRequest, PingResponse};
