//! Completion endpoint configuration.
//!
//! Built once at process start from the server's flags/environment and handed
//! to [`CompletionClient`](super::CompletionClient); request handling never
//! reads the environment.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use thiserror::Error;
use url::Url;

/// Default timeout for a completion call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while resolving [`ChatConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid API key: not a valid HTTP header value")]
    InvalidApiKey,

    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Static configuration for the completion endpoint.
#[derive(Clone)]
pub struct ChatConfig {
    /// Secret sent as the `api-key` header.
    pub api_key: String,
    /// Full URL of the chat-completion endpoint.
    pub endpoint: Url,
    /// Budget for a whole call, connect through body.
    pub timeout: Duration,
}

impl ChatConfig {
    /// Validate and build a config.
    pub fn new(api_key: String, endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing("API_KEY"));
        }
        // Sent verbatim as a header; reject what reqwest would refuse per call.
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(ConfigError::InvalidApiKey);
        }
        if endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("ENDPOINT"));
        }
        let endpoint = Url::parse(endpoint.trim()).map_err(|source| ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            source,
        })?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_key,
            endpoint,
            timeout,
        })
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}
