//! Chat module: single-turn conversation with a remote completion API.
//!
//! A request flows through two steps:
//!
//! 1. [`payload::build_payload`] wraps the caller's text together with the
//!    fixed system instruction and sampling parameters.
//! 2. [`client::CompletionClient`] posts that payload to the configured
//!    endpoint and extracts the assistant's reply.
//!
//! # Public API
//!
//! - [`payload::build_payload`]: assemble the outbound request body
//! - [`client::ChatCompletion`]: the completion seam used by the HTTP layer
//! - [`client::CompletionClient`]: reqwest-backed implementation
//! - [`config::ChatConfig`]: endpoint, API key and timeout

pub mod client;
pub mod config;
pub mod payload;
pub mod prompt;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{ChatCompletion, CompletionClient};
pub use config::{ChatConfig, ConfigError};
pub use payload::{Payload, SamplingParams, build_payload};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in the outbound conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The assistant's reply to a submitted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
}

/// Outcome of a single completion call.
pub type CompletionResult = Result<Completion, CompletionError>;

/// Coarse classification of a failed completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConnectionError,
    TimeoutError,
    HttpError,
    MalformedResponse,
    UnknownError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ConnectionError => "ConnectionError",
            ErrorKind::TimeoutError => "TimeoutError",
            ErrorKind::HttpError => "HttpError",
            ErrorKind::MalformedResponse => "MalformedResponse",
            ErrorKind::UnknownError => "UnknownError",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while calling the completion endpoint.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Failed to connect to completion endpoint: {0}")]
    Connection(String),

    #[error("Completion request timed out: {0}")]
    Timeout(String),

    #[error("Completion endpoint returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Completion request failed: {0}")]
    Unknown(String),
}

impl CompletionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompletionError::Connection(_) => ErrorKind::ConnectionError,
            CompletionError::Timeout(_) => ErrorKind::TimeoutError,
            CompletionError::Http { .. } => ErrorKind::HttpError,
            CompletionError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            CompletionError::Unknown(_) => ErrorKind::UnknownError,
        }
    }

    /// Human-readable category reported to the caller as `error`.
    pub fn category(&self) -> &'static str {
        match self.kind() {
            ErrorKind::ConnectionError => "Connection Error occurred",
            ErrorKind::TimeoutError => "Timeout Error occurred",
            ErrorKind::HttpError => "HTTP Error occurred",
            ErrorKind::MalformedResponse => "Malformed response received",
            ErrorKind::UnknownError => "An unknown error occurred",
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        // Connect timeouts report both; they count as timeouts.
        if e.is_timeout() {
            CompletionError::Timeout(e.to_string())
        } else if e.is_connect() {
            CompletionError::Connection(e.to_string())
        } else {
            CompletionError::Unknown(e.to_string())
        }
    }
}
