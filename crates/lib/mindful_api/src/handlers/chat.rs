//! `POST /chat`: one user message in, one assistant reply out.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use mindful_core::chat::build_payload;
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult, NO_MESSAGE_PROVIDED};
use crate::models::{ChatRequest, ChatResponse};

/// `POST /chat`: forward the message to the completion endpoint.
///
/// Bodies that are not JSON, or whose `message` is absent, empty or not a
/// string, are rejected with 400 before any outbound call.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let message = match body {
        Ok(Json(ChatRequest { message })) => message.filter(|m| !m.is_empty()),
        Err(rejection) => {
            debug!(error = %rejection, "rejected chat body");
            None
        }
    }
    .ok_or_else(|| AppError::Validation(NO_MESSAGE_PROVIDED.into()))?;

    info!(message_len = message.len(), "chat request");

    let payload = build_payload(&message);
    let completion = state.completions.complete(&payload).await?;

    Ok(Json(ChatResponse {
        response: completion.content,
    }))
}
