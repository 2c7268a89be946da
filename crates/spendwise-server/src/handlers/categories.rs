//! Category handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use spendwise_core::models::{Category, NewCategory};

/// GET /api/users/:user_id/categories - List a user's categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.db.list_categories(user_id)?;
    Ok(Json(categories))
}

/// POST /api/users/:user_id/categories - Create a category
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<NewCategory>,
) -> Result<Json<Category>, AppError> {
    let category = state.db.create_category(user_id, &payload)?;
    Ok(Json(category))
}

/// GET /api/users/:user_id/categories/:id - Get one category
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> Result<Json<Category>, AppError> {
    let category = state
        .db
        .get_category(user_id, id)?
        .ok_or_else(|| AppError::not_found("Category not found"))?;
    Ok(Json(category))
}

/// PUT /api/users/:user_id/categories/:id - Update a category
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(i64, i64)>,
    Json(payload): Json<NewCategory>,
) -> Result<Json<Category>, AppError> {
    let category = state.db.update_category(user_id, id, &payload)?;
    Ok(Json(category))
}

/// DELETE /api/users/:user_id/categories/:id - Delete a category
///
/// Expenses in the category become uncategorized rather than being deleted.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_category(user_id, id)?;
    Ok(Json(SuccessResponse { success: true }))
}
