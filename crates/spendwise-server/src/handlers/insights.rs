//! Insight snapshot handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::{AppError, AppState};
use spendwise_core::snapshot::{self, MonthlySnapshot};

#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// GET /api/users/:user_id/insights - Fetch a stored snapshot
///
/// Defaults to the current calendar month when no month/year is given.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<MonthlySnapshot>, AppError> {
    let today = Utc::now().date_naive();
    let month = params.month.unwrap_or_else(|| today.month());
    let year = params.year.unwrap_or_else(|| today.year());

    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }

    let snapshot = state
        .db
        .get_snapshot(user_id, month, year)?
        .ok_or_else(|| AppError::not_found("No insights generated for this month"))?;
    Ok(Json(snapshot))
}

/// POST /api/users/:user_id/insights/generate - Compute and store the
/// current month's snapshot
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MonthlySnapshot>, AppError> {
    let today = Utc::now().date_naive();
    let generated = snapshot::generate_snapshot(&state.db, user_id, today)?;
    Ok(Json(generated))
}
