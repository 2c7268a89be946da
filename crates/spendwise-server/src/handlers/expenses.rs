//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use spendwise_core::models::{Expense, NewExpense};

/// Hard cap on expense listing page size
const MAX_EXPENSE_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    pub limit: Option<i64>,
}

/// GET /api/users/:user_id/expenses - List expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<ExpenseQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(100)
        .clamp(1, MAX_EXPENSE_LIMIT);
    let expenses = state.db.list_expenses(user_id, limit)?;
    Ok(Json(expenses))
}

/// POST /api/users/:user_id/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<NewExpense>,
) -> Result<Json<Expense>, AppError> {
    let expense = state.db.insert_expense(user_id, &payload)?;
    Ok(Json(expense))
}

/// GET /api/users/:user_id/expenses/:id - Get one expense
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .db
        .get_expense(user_id, id)?
        .ok_or_else(|| AppError::not_found("Expense not found"))?;
    Ok(Json(expense))
}

/// DELETE /api/users/:user_id/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_expense(user_id, id)?;
    Ok(Json(SuccessResponse { success: true }))
}
