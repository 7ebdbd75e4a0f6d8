//! Application error type mapping chat failures to HTTP responses.
//!
//! Bodies are flat JSON objects: `{"error": ...}` for validation failures and
//! `{"error": ..., "details": ...}` for upstream failures.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use parley_types::error::ChatError;

/// Shown when retries were exhausted while the model stayed rate limited.
pub const RATE_LIMITED_MESSAGE: &str =
    "Rate limited by AI service. Please wait a moment and try again.";

/// Shown for every other model failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate response";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Failure from the chat pipeline.
    Chat(ChatError),
    /// Request body could not be decoded as a chat request.
    Body(JsonRejection),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Body(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Chat(ChatError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::Chat(ChatError::RateLimited { source, .. }) => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": RATE_LIMITED_MESSAGE, "details": source.to_string() }),
            ),
            AppError::Chat(ChatError::Upstream { source, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": GENERATION_FAILED_MESSAGE, "details": source.to_string() }),
            ),
            AppError::Body(rejection) => (
                rejection.status(),
                json!({ "error": "Invalid request body", "details": rejection.body_text() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
