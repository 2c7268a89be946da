//! Budget alert handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use spendwise_core::budget;
use spendwise_core::models::BudgetAlert;
use spendwise_core::TriggeredAlert;

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// GET /api/users/:user_id/alerts - List stored alerts, newest first
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<AlertQuery>,
) -> Result<Json<Vec<BudgetAlert>>, AppError> {
    let alerts = state.db.list_budget_alerts(user_id, params.unread_only)?;
    Ok(Json(alerts))
}

/// POST /api/users/:user_id/alerts/check - Evaluate budget thresholds
///
/// Returns every category currently breaching a threshold. New breaches
/// are persisted; breaches already recorded this month are reported
/// without a second row.
pub async fn check_alerts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<TriggeredAlert>>, AppError> {
    let today = Utc::now().date_naive();
    let triggered = budget::check_budgets(&state.db, user_id, today)?;
    Ok(Json(triggered))
}

/// POST /api/users/:user_id/alerts/:id/read - Mark an alert as read
pub async fn mark_alert_read(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.mark_alert_read(user_id, id)? {
        return Err(AppError::not_found("Alert not found"));
    }
    Ok(Json(SuccessResponse { success: true }))
}
