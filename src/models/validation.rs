//! Validation outcome.

use serde::{Deserialize, Serialize};

/// Result of specification validation.
///
/// Three buckets, no numeric severity:
/// - errors block the order
/// - warnings need acknowledgment but never block
/// - missing fields are informational, defaults apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

impl ValidationResult {
    /// Build a result from accumulated findings; valid iff there are no errors
    pub fn from_findings(
        errors: Vec<String>,
        warnings: Vec<String>,
        missing_fields: Vec<String>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            missing_fields,
        }
    }

    /// A single blocking error and nothing else
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::from_findings(vec![error.into()], vec![], vec![])
    }
}
