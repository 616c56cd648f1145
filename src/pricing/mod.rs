//! Pricing engine module.
//!
//! Deterministic price estimates for validated print specifications. All
//! rates come from a [`PricingConfig`]; the same specification and config
//! always produce the same estimate.

pub mod calculators;
pub mod config;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::round_money;
pub use config::{ConfigError, PricingConfig};
pub use routes::router;
pub use services::{
    calculate_price, run_estimate_pipeline, EstimateOutcome, EstimateStatus, PricingError,
};
