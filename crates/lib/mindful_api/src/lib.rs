//! # mindful_api
//!
//! HTTP API library for Mindful.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use mindful_core::chat::{ChatCompletion, CompletionClient, CompletionError};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health, index};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend; read-only and shared by every request.
    pub completions: Arc<dyn ChatCompletion>,
}

impl AppState {
    /// Wrap any completion backend.
    pub fn new(completions: Arc<dyn ChatCompletion>) -> Self {
        Self { completions }
    }

    /// Build the state around a [`CompletionClient`] for the configured endpoint.
    pub fn from_config(config: &ApiConfig) -> Result<Self, CompletionError> {
        let client = CompletionClient::new(&config.chat)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_INDEX, get(index::index_handler))
        .route(routes::GET_HEALTHZ, get(health::health_handler))
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}
