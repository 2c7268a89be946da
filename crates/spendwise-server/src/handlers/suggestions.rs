//! Spending suggestion handler

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use spendwise_core::{SuggestionEngine, SuggestionReport};

/// GET /api/users/:user_id/suggestions - Run the analysis pipeline
///
/// Read-only: recomputes aggregates from the stored expenses on every call
/// and persists nothing.
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<SuggestionReport>, AppError> {
    let report = SuggestionEngine::new(&state.db).generate(user_id)?;
    Ok(Json(report))
}
