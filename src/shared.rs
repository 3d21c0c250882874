use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::stats::{self, StatsError, StatsService};
use crate::store::{DocumentStore, StoreError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            stats_service: Arc::new(StatsService::new(store)),
        }
    }
}

/// Routes exposed to the portal front end
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ranking", get(stats::handlers::get_player_ranking))
        .route("/seasons", get(stats::handlers::list_seasons))
        .route(
            "/events/:event_id/games/:game_id/box-score",
            get(stats::handlers::get_game_box_score),
        )
        .route(
            "/events/:event_id/standings",
            get(stats::handlers::get_standings),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::NotFound(msg) => AppError::NotFound(msg),
            StatsError::Validation(msg) => AppError::BadRequest(msg),
            StatsError::Store(StoreError::CollectionNotFound(msg)) => AppError::NotFound(msg),
            StatsError::Store(err) => AppError::DatabaseError(err.to_string()),
            StatsError::InvalidRecord(_) => AppError::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
