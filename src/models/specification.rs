//! Print job specification as delivered by the extraction step.
//!
//! Every field is optional because extraction may be partial. Validation
//! happens afterwards and never mutates the specification.

use serde::{Deserialize, Deserializer, Serialize};

/// Single or double-sided printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    Single,
    Double,
}

/// Color printing mode.
///
/// The snake_case name doubles as the modifier key in the pricing config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    FullColor,
    BlackWhite,
    SpotColor,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::FullColor => "full_color",
            ColorMode::BlackWhite => "black_white",
            ColorMode::SpotColor => "spot_color",
        }
    }
}

/// Extracted print job specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Product category (business_cards, flyers, posters, ...)
    #[serde(default)]
    pub product_type: Option<String>,
    /// Number of units. Signed so out-of-range input can be reported.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Free-form size, e.g. "3.5x2" or "11x17"
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub paper_stock: Option<String>,
    #[serde(default)]
    pub sides: Option<Sides>,
    /// matte, gloss, satin, uncoated, ...
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub color_mode: Option<ColorMode>,
    /// Add-on tags in request order
    #[serde(default)]
    pub options: Vec<String>,
    /// Requested turnaround in business days
    #[serde(default)]
    pub turnaround_days: Option<i64>,
    /// Explicit rush flag; null counts as not rushed
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_rush: bool,
    #[serde(default)]
    pub artwork_dpi: Option<i64>,
    /// Original input text, kept for audit only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
}

impl Specification {
    /// Start a specification for a product and quantity
    pub fn new(product_type: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_type: Some(product_type.into()),
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether enough is known to attempt pricing.
    ///
    /// The orchestrator prices whenever product type and a non-zero quantity
    /// are both present, regardless of other validation errors. A zero
    /// quantity counts as absent; a negative one is passed on so pricing
    /// can report it.
    pub fn is_priceable(&self) -> bool {
        self.product_type.as_deref().is_some_and(|p| !p.is_empty())
            && self.quantity.is_some_and(|q| q != 0)
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_spec() {
        let spec: Specification = serde_json::from_str(
            r#"{"product_type": "flyers", "quantity": 250, "sides": "double", "color_mode": "black_white"}"#,
        )
        .unwrap();

        assert_eq!(spec.product_type.as_deref(), Some("flyers"));
        assert_eq!(spec.quantity, Some(250));
        assert_eq!(spec.sides, Some(Sides::Double));
        assert_eq!(spec.color_mode, Some(ColorMode::BlackWhite));
        assert!(spec.options.is_empty());
        assert!(!spec.is_rush);
        assert!(spec.turnaround_days.is_none());
    }

    #[test]
    fn test_null_is_rush_means_not_rushed() {
        let spec: Specification = serde_json::from_str(
            r#"{"product_type": "flyers", "quantity": 100, "is_rush": null}"#,
        )
        .unwrap();
        assert!(!spec.is_rush);

        let spec: Specification = serde_json::from_str(r#"{"is_rush": true}"#).unwrap();
        assert!(spec.is_rush);
    }

    #[test]
    fn test_unknown_sides_rejected() {
        let result = serde_json::from_str::<Specification>(r#"{"sides": "triple"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_color_mode_key_matches_wire_name() {
        for mode in [ColorMode::FullColor, ColorMode::BlackWhite, ColorMode::SpotColor] {
            let wire = serde_json::to_value(mode).unwrap();
            assert_eq!(wire, serde_json::Value::String(mode.as_str().to_string()));
        }
    }

    #[test]
    fn test_is_priceable() {
        assert!(Specification::new("flyers", 10).is_priceable());
        assert!(Specification::new("flyers", -1).is_priceable());
        assert!(!Specification::new("flyers", 0).is_priceable());

        let mut spec = Specification::new("flyers", 10);
        spec.quantity = None;
        assert!(!spec.is_priceable());

        let spec = Specification::new("", 10);
        assert!(!spec.is_priceable());
    }
}
