//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::models::{PriceEstimate, Specification, ValidationResult};

use super::config::PricingConfig;
use super::services::EstimateStatus;

/// Response for an estimate request.
///
/// Validation is always present, even on success.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub request_id: Uuid,
    pub status: EstimateStatus,
    pub extracted_specs: Option<Specification>,
    pub validation: ValidationResult,
    pub estimate: Option<PriceEstimate>,
    pub config_version: String,
    pub received_at: DateTime<Utc>,
}

/// Summary of the active pricing config
#[derive(Debug, Serialize)]
pub struct ConfigSummaryResponse {
    pub version: String,
    pub currency: String,
    pub products: Vec<String>,
    pub options: Vec<String>,
    pub threshold_quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub cache: CacheStats,
}

impl ConfigSummaryResponse {
    pub fn new(config: &PricingConfig, cache: CacheStats) -> Self {
        Self {
            version: config.version.clone(),
            currency: config.currency.clone(),
            products: config.products.keys().cloned().collect(),
            options: config.options.keys().cloned().collect(),
            threshold_quantity: config.print_method.threshold_quantity,
            margin_percent: config.margin_percent,
            tax_rate: config.tax_rate,
            cache,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
