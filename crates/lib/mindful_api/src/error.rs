//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mindful_core::chat::CompletionError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message returned when `/chat` gets no usable input.
pub const NO_MESSAGE_PROVIDED: &str = "No message provided";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(message) => ErrorResponse {
                error: message,
                details: None,
            },
            AppError::Completion(e) => ErrorResponse {
                error: e.category().to_string(),
                details: Some(e.to_string()),
            },
        };
        (status, Json(body)).into_response()
    }
}
