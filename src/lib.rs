//! Print job validation and pricing service.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod cache;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod settings;
pub mod validation;

use cache::ConfigCache;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub cache: ConfigCache,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(pricing::router())
        .merge(routes::router())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
