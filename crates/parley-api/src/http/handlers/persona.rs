//! Persona listing endpoint.
//!
//! GET /personas - Public profiles of the configured persona set.

use axum::Json;
use axum::extract::State;

use parley_types::persona::PersonaProfile;

use crate::state::AppState;

/// GET /personas - List personas in configured order.
///
/// System prompts are never included.
pub async fn list_personas(State(state): State<AppState>) -> Json<Vec<PersonaProfile>> {
    Json(state.orchestrator.personas().profiles())
}
