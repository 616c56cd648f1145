//! Pricing API route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::models::ValidationResult;
use crate::validation::validate_specs;
use crate::AppState;

use super::requests::EstimateRequest;
use super::responses::{ConfigSummaryResponse, EstimateResponse};
use super::services::run_estimate_pipeline;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/estimate", post(estimate))
        .route("/api/pricing/validate", post(validate))
        .route("/api/pricing/config", get(config_summary))
        .route("/api/pricing/config/reload", post(reload_config))
}

/// Validate and price an extracted specification
async fn estimate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>> {
    let Json(request) = payload?;
    let request_id = Uuid::new_v4();
    let received_at = Utc::now();
    info!(
        "Processing estimate request {}, source: {}",
        request_id,
        request.source.as_deref().unwrap_or("unknown")
    );

    let config = state.cache.current().await;
    let outcome = run_estimate_pipeline(request.specs.as_ref(), &config);

    Ok(Json(EstimateResponse {
        request_id,
        status: outcome.status,
        extracted_specs: request.specs,
        validation: outcome.validation,
        estimate: outcome.estimate,
        config_version: config.version.clone(),
        received_at,
    }))
}

/// Validation only, no pricing
async fn validate(
    payload: std::result::Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>> {
    let Json(request) = payload?;
    Ok(Json(validate_specs(request.specs.as_ref())))
}

async fn config_summary(State(state): State<AppState>) -> Json<ConfigSummaryResponse> {
    let config = state.cache.current().await;
    Json(ConfigSummaryResponse::new(&config, state.cache.stats()))
}

/// Re-read the config document and swap it in
async fn reload_config(State(state): State<AppState>) -> Result<Json<ConfigSummaryResponse>> {
    let config = state.cache.reload().await?;
    Ok(Json(ConfigSummaryResponse::new(&config, state.cache.stats())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ConfigCache;
    use crate::pricing::PricingConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn state() -> AppState {
        AppState {
            cache: ConfigCache::with_config("missing.json", PricingConfig::embedded_default())
                .await,
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_estimate_endpoint() {
        let app = router().with_state(state().await);
        let (status, body) = post_json(
            app,
            "/api/pricing/estimate",
            json!({
                "source": "text",
                "specs": {
                    "product_type": "business_cards",
                    "quantity": 500,
                    "size": "3.5x2",
                    "paper_stock": "14pt",
                    "sides": "double",
                    "finish": "matte",
                    "color_mode": "full_color",
                    "options": ["rounded_corners"]
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["validation"]["is_valid"], true);
        assert_eq!(body["estimate"]["print_method"], "offset");
        assert_eq!(body["estimate"]["breakdown"]["option_costs"]["rounded_corners"], "15.00");
        assert_eq!(body["config_version"], "default");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_estimate_without_specs() {
        let app = router().with_state(state().await);
        let (status, body) = post_json(app, "/api/pricing/estimate", json!({"specs": null})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "extraction_failed");
        assert!(body["estimate"].is_null());
    }

    #[tokio::test]
    async fn test_estimate_accepts_null_rush_flag() {
        let app = router().with_state(state().await);
        let (status, body) = post_json(
            app,
            "/api/pricing/estimate",
            json!({"specs": {"product_type": "flyers", "quantity": 100, "is_rush": null}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["extracted_specs"]["is_rush"], false);
        assert!(!body["estimate"]["estimate_notes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n.as_str().unwrap().contains("rush")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = router().with_state(state().await);
        let (status, body) = post_json(
            app,
            "/api/pricing/estimate",
            json!({"specs": {"sides": "triple"}}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "invalid_request");
        assert!(body["message"].as_str().unwrap().contains("sides"));
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let app = router().with_state(state().await);
        let (status, body) = post_json(
            app,
            "/api/pricing/validate",
            json!({"specs": {"product_type": "unknown_xyz", "quantity": -1}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_valid"], false);
        assert!(body["errors"].as_array().unwrap().len() >= 2);
    }

    #[tokio::test]
    async fn test_reload_missing_file_is_config_error() {
        let app = router().with_state(state().await);
        let (status, body) = post_json(app, "/api/pricing/config/reload", json!({})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "config_error");
    }
}
