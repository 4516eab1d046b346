pub mod builders;
pub mod projects;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared handler state. Connections are opened per request, so the state
/// only carries the database location.
#[derive(Clone)]
pub struct AppState {
    pub db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/api/builders", get(builders::list_builders))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Error surface of the JSON API. Storage failures never reach this type;
/// the fallback policy absorbs them before a handler returns.
#[derive(Debug)]
pub enum ApiError {
    /// Rejected request input; rendered as HTTP 400.
    Validation(String),
    /// Anything unexpected; rendered as HTTP 500 with a generic message.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        let body = Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}
