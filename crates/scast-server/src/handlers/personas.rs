//! Persona catalog handler.

use axum::extract::State;
use axum::Json;

use scast_models::PersonaRecord;

use crate::state::AppState;

/// List the persona catalog in its wire shape.
pub async fn list_personas(State(state): State<AppState>) -> Json<Vec<PersonaRecord>> {
    Json(state.catalog.records())
}
