//! Price estimate output.
//!
//! Money fields are serialized as strings so quotes survive JSON clients
//! without float drift.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Print production technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMethod {
    /// Low setup, higher per-unit cost
    Digital,
    /// Plate setup, cheaper per unit at scale
    Offset,
}

impl PrintMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintMethod::Digital => "digital",
            PrintMethod::Offset => "offset",
        }
    }
}

/// Itemized cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub material_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub print_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub setup_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub finishing_cost: Decimal,
    /// Cost per priced option, in request order
    pub option_costs: IndexMap<String, Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub rush_fee: Decimal,
    /// Volume discount, zero or negative
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_amount: Decimal,
    /// Margin as a percentage (30 for a 0.30 margin)
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_percent: Decimal,
}

impl PricingBreakdown {
    pub fn options_total(&self) -> Decimal {
        self.option_costs.values().copied().sum()
    }
}

/// Complete price estimate for a print job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub print_method: PrintMethod,
    pub print_method_reason: String,
    pub breakdown: PricingBreakdown,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency: String,
    /// Which pricing rules fired
    pub estimate_notes: Vec<String>,
}
