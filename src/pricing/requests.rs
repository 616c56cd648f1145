//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

use crate::models::Specification;

/// Request to validate and price an extracted specification.
///
/// `specs` is null when the upstream extraction produced nothing.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub specs: Option<Specification>,
    /// Where the specification came from (text, pdf, image, ...)
    #[serde(default)]
    pub source: Option<String>,
}
