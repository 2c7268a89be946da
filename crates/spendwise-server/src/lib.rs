//! Spendwise Web Server
//!
//! Axum-based REST API for the Spendwise personal finance tracker.
//! All routes are scoped under /api/users/:user_id; authentication and
//! session handling live in front of this service. Error responses are
//! sanitized: internal failures log the full error and return a generic
//! message.

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use spendwise_core::db::Database;
use spendwise_core::error::Error as CoreError;

mod handlers;

/// Shared application state
pub struct AppState {
    pub db: Database,
}

/// Create the application router
pub fn create_router(db: Database) -> Router {
    let state = Arc::new(AppState { db });

    let api_routes = Router::new()
        // Categories
        .route(
            "/users/:user_id/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/users/:user_id/categories/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        // Expenses
        .route(
            "/users/:user_id/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/users/:user_id/expenses/:id",
            get(handlers::get_expense).delete(handlers::delete_expense),
        )
        // Spending analysis
        .route("/users/:user_id/suggestions", get(handlers::get_suggestions))
        // Budget alerts
        .route("/users/:user_id/alerts", get(handlers::list_alerts))
        .route("/users/:user_id/alerts/check", post(handlers::check_alerts))
        .route(
            "/users/:user_id/alerts/:id/read",
            post(handlers::mark_alert_read),
        )
        // Insight snapshots
        .route("/users/:user_id/insights", get(handlers::get_insights))
        .route(
            "/users/:user_id/insights/generate",
            post(handlers::generate_insights),
        );

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(db);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Generic success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidData(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg,
                internal: None,
            },
            CoreError::NotFound(msg) => Self {
                status: StatusCode::NOT_FOUND,
                message: msg,
                internal: None,
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(other.into()),
            },
        }
    }
}
