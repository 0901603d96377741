//! Outbound payload assembly.

use serde::Serialize;

use super::Message;
use super::prompt::SYSTEM_INSTRUCTION;

/// Sampling parameters attached to every payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl SamplingParams {
    pub const DEFAULT: SamplingParams = SamplingParams {
        temperature: 0.7,
        top_p: 0.95,
        max_tokens: 200,
    };
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// JSON body posted to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

/// Build a fresh payload: the system instruction followed by `user_text`.
///
/// The caller rejects empty input before getting here.
pub fn build_payload(user_text: &str) -> Payload {
    debug_assert!(!user_text.is_empty(), "user text must be non-empty");

    let SamplingParams {
        temperature,
        top_p,
        max_tokens,
    } = SamplingParams::DEFAULT;

    Payload {
        messages: vec![Message::system(SYSTEM_INSTRUCTION), Message::user(user_text)],
        temperature,
        top_p,
        max_tokens,
    }
}
