//! Structured logging and optional OpenTelemetry trace export.
//!
//! Logs are JSON lines on stdout. When an OTLP endpoint is configured, spans
//! are also exported over gRPC to that collector.
//!
//! # Telemetry invariants
//!
//! - Request bodies never appear in any span attribute or log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_telemetry;
