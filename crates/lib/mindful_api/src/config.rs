//! API server configuration.

use mindful_core::chat::ChatConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5000").
    pub bind_addr: String,
    /// Completion endpoint settings.
    pub chat: ChatConfig,
}

impl ApiConfig {
    pub fn new(bind_addr: impl Into<String>, chat: ChatConfig) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            chat,
        }
    }
}
