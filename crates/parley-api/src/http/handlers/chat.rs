//! Chat endpoint.
//!
//! POST /chat - One tutoring turn: message plus optional persona and history.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use parley_types::chat::{ChatRequest, ChatResult};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /chat - Generate the persona's reply and optional feedback.
///
/// A missing or empty `message` is a 400; the model is never called then.
/// Unparseable model output still yields 200 with the raw text as the reply.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, AppError> {
    let Json(request) = body?;
    let result = state.orchestrator.handle_request(request).await?;
    Ok(Json(result))
}
