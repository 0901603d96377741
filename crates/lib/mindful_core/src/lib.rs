//! # mindful_core
//!
//! Core chat logic for Mindful.
//!
//! Everything that does not depend on the HTTP server lives here: the
//! outbound payload model, the fixed system instruction, and the client that
//! talks to the remote chat-completion endpoint.

pub mod chat;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
