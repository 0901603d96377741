//! Completion client.
//!
//! Posts a [`Payload`] to the configured endpoint with the `api-key` header and
//! decodes the first choice of the reply. One attempt per call; every failure
//! comes back as a [`CompletionError`] tagged with its kind.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use super::config::ChatConfig;
use super::payload::Payload;
use super::{Completion, CompletionError, CompletionResult};

/// Header carrying the endpoint API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Upper bound on how much of an error body is kept in the details.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Upper bound on how much of an error body is read off the wire.
const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

/// Something that can turn a payload into a completion.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, payload: &Payload) -> CompletionResult;
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// reqwest-backed [`ChatCompletion`].
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl CompletionClient {
    /// Build a client whose every call is bounded by `config.timeout`.
    pub fn new(config: &ChatConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Unknown(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, payload: &Payload) -> CompletionResult {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body: read_error_body(response).await?,
            });
        }

        let body = response.text().await?;
        parse_completion(&body)
    }
}

/// Read at most [`MAX_ERROR_BODY_BYTES`] of a failed response; the rest is dropped unread.
async fn read_error_body(mut response: Response) -> Result<String, CompletionError> {
    let mut buf = Vec::new();
    while buf.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await? {
            Some(chunk) => buf.extend_from_slice(&chunk),
            None => break,
        }
    }
    buf.truncate(MAX_ERROR_BODY_BYTES);
    Ok(truncate(&String::from_utf8_lossy(&buf), MAX_ERROR_BODY_CHARS))
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatCompletion for CompletionClient {
    async fn complete(&self, payload: &Payload) -> CompletionResult {
        let start = Instant::now();
        debug!(
            endpoint = %self.endpoint,
            messages = payload.messages.len(),
            "sending completion request"
        );

        let result = self.send(payload).await;

        match &result {
            Ok(completion) => info!(
                elapsed_ms = start.elapsed().as_millis(),
                reply_len = completion.content.len(),
                "completion succeeded"
            ),
            Err(e) => warn!(
                kind = %e.kind(),
                elapsed_ms = start.elapsed().as_millis(),
                error = %e,
                "completion failed"
            ),
        }

        result
    }
}

/// Decode a success body into the first choice's content.
fn parse_completion(body: &str) -> CompletionResult {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| Completion {
            content: choice.message.content,
        })
        .ok_or_else(|| CompletionError::MalformedResponse("response contained no choices".into()))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
