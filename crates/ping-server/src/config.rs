//! Configuration loading and validation for the ping server.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::server::{middleware::REQUEST_TIMEOUT, state::DEFAULT_MAX_BODY_BYTES};

/// Validated ping server configuration.
///
/// Built once at startup and never mutated; the server holds it by value.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTPS server listens on. Must be in 1–65535.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Filesystem path to the PEM-encoded TLS certificate chain. **Required.**
    pub tls_cert_path: String,

    /// Filesystem path to the PEM-encoded TLS private key. **Required.**
    pub tls_key_path: String,

    /// Text appended to every successful ping response.
    #[serde(default = "default_ping_response_message")]
    pub ping_response_message: String,

    /// How long (seconds) shutdown waits for in-flight requests. `0` waits
    /// indefinitely.
    #[serde(default)]
    pub shutdown_grace_period_secs: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound on the request body size accepted by the JSON decoder.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional OTLP endpoint; when unset only JSON logs are emitted.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    9093
}
fn default_ping_response_message() -> String {
    "pong".into()
}
fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Build a configuration from the three mandatory values, with defaults
    /// for everything else.
    pub fn new(port: u16, tls_cert_path: impl Into<String>, tls_key_path: impl Into<String>) -> Self {
        Self {
            port,
            tls_cert_path: tls_cert_path.into(),
            tls_key_path: tls_key_path.into(),
            ping_response_message: default_ping_response_message(),
            shutdown_grace_period_secs: 0,
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
        }
    }

    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("PORT must be in 1-65535");
        }
        self.validate_settings()
    }

    /// Validate everything except the listen port, for callers that bring
    /// their own listener.
    pub fn validate_settings(&self) -> Result<()> {
        ensure_non_empty(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path, "TLS_KEY_PATH")?;

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be > 0");
        }
        Ok(())
    }

    /// Drain bound for graceful shutdown, `None` when unbounded.
    pub fn shutdown_grace_period(&self) -> Option<Duration> {
        match self.shutdown_grace_period_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
