//! Service-level routes

use axum::{routing::get, Json, Router};

use crate::error::AppError;
use crate::pricing::responses::HealthResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unmatched paths
pub async fn not_found() -> AppError {
    AppError::NotFound
}
