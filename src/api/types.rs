//! API request and response types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::models::Evidence;
use crate::rag::OnlineAnswer;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `POST /api/chat` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// `POST /api/chat` reply, for answers and failures alike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub evidence: Vec<Evidence>,
}

/// What the chat handler produced.
///
/// Both variants are sent as `200 OK`; a degraded outcome carries the error
/// text in `answer` and no evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Answered(OnlineAnswer),
    Degraded { reason: String },
}

impl ChatOutcome {
    pub fn degraded(reason: impl std::fmt::Display) -> Self {
        Self::Degraded {
            reason: reason.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn into_chat_response(self) -> ChatResponse {
        match self {
            Self::Answered(answer) => ChatResponse {
                answer: answer.answer,
                evidence: answer.evidence,
            },
            Self::Degraded { reason } => ChatResponse {
                answer: format!(
                    "Sorry, I encountered an error processing your question: {reason}"
                ),
                evidence: Vec::new(),
            },
        }
    }
}

impl<E: std::fmt::Display> From<Result<OnlineAnswer, E>> for ChatOutcome {
    fn from(result: Result<OnlineAnswer, E>) -> Self {
        match result {
            Ok(answer) => Self::Answered(answer),
            Err(e) => Self::degraded(e),
        }
    }
}

impl IntoResponse for ChatOutcome {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.into_chat_response())).into_response()
    }
}
