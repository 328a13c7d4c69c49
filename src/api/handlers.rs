//! HTTP request handlers

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::Json;
use tracing::error;
use tracing::info;

use super::types::ApiResponse;
use super::types::ChatOutcome;
use super::types::ChatRequest;
use super::types::HealthResponse;
use crate::rag::RagService;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(rag: Arc<RagService>, request_timeout: Duration) -> Self {
        Self {
            rag,
            request_timeout,
        }
    }
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Answer a question.
///
/// Never fails at the transport level: errors and timeouts become a
/// [`ChatOutcome::Degraded`]. A timeout drops the in-flight provider calls.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> ChatOutcome {
    info!("POST /api/chat: {}", req.question);

    let outcome = match tokio::time::timeout(
        state.request_timeout,
        state.rag.answer_online(&req.question),
    )
    .await
    {
        Ok(result) => ChatOutcome::from(result),
        Err(_) => ChatOutcome::degraded(format!(
            "request timed out after {:?}",
            state.request_timeout
        )),
    };

    if let ChatOutcome::Degraded { reason } = &outcome {
        error!("Error in RAG pipeline: {}", reason);
    }
    outcome
}
