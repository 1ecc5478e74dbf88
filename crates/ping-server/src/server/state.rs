//! Immutable dependencies injected into route handlers.

use crate::config::Config;

/// Route parameters shared by every request.
///
/// Built once per server instance and handed to handlers behind an `Arc`;
/// nothing mutates it after construction, so concurrent reads need no locking.
#[derive(Debug, Clone)]
pub struct Dependencies {
    /// Appended to every successful ping response.
    pub ping_response_message: String,
    /// Upper bound on request body size accepted by the JSON decoder.
    pub max_body_bytes: usize,
}

/// Body limit used when none is configured.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

impl Dependencies {
    /// Create a new [`Dependencies`] with the default body limit.
    pub fn new(ping_response_message: impl Into<String>) -> Self {
        Self {
            ping_response_message: ping_response_message.into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the request body limit.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

impl From<&Config> for Dependencies {
    /// Take the route parameters (message and body limit) from `config`.
    fn from(config: &Config) -> Self {
        Self::new(config.ping_response_message.clone()).with_max_body_bytes(config.max_body_bytes)
    }
}

impl Default for Dependencies {
    /// Creates [`Dependencies`] answering `"pong"`, suitable for tests.
    fn default() -> Self {
        Self::new("pong")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_fully_initialised() {
        let deps = Dependencies::new("test pong");
        assert_eq!(deps.ping_response_message, "test pong");
        assert_eq!(deps.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn body_limit_override() {
        let deps = Dependencies::default().with_max_body_bytes(10);
        assert_eq!(deps.max_body_bytes, 10);
        assert_eq!(deps.ping_response_message, "pong");
    }

    #[test]
    fn from_config_carries_route_settings() {
        let config = Config {
            ping_response_message: "from config".into(),
            max_body_bytes: 512,
            ..Config::new(9093, "tls.crt", "tls.key")
        };
        let deps = Dependencies::from(&config);
        assert_eq!(deps.ping_response_message, "from config");
        assert_eq!(deps.max_body_bytes, 512);
    }
}
