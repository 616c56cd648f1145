//! Pricing service functions.
//!
//! [`calculate_price`] runs the deterministic pricing rules against a config
//! snapshot; [`run_estimate_pipeline`] sequences validation and pricing the
//! way the HTTP layer needs it.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::models::{PriceEstimate, PricingBreakdown, Sides, Specification, ValidationResult};
use crate::validation::validate_specs;

use super::calculators::{
    discount_tier, finish_modifier, option_cost, round_money, select_print_method,
    whole_percent, RushClass,
};
use super::config::{PricingConfig, DEFAULT_PRODUCT};

/// Factor used when the config has no `double_sided` modifier
const DEFAULT_DOUBLE_SIDED: Decimal = dec!(1.6);

/// Pricing calculation error types.
///
/// Business conditions never fail pricing; this only covers inputs the
/// orchestrator should have rejected before calling in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("quantity must be at least 1, got {0}")]
    NonPositiveQuantity(i64),
}

/// Calculate a price estimate for a specification.
///
/// Identical inputs always give an identical estimate. Unknown products use
/// the `default` rates and unknown options are skipped with a note.
///
/// Steps, in order: print method, base costs, modifiers (print and finishing
/// only), options, volume discount, rush fee on the discounted base, margin,
/// minimum price floor, tax. Money is rounded only when the estimate is built.
pub fn calculate_price(
    spec: &Specification,
    config: &PricingConfig,
) -> Result<PriceEstimate, PricingError> {
    let quantity = match spec.quantity {
        None => 1,
        Some(q) if q >= 1 => q,
        Some(q) => return Err(PricingError::NonPositiveQuantity(q)),
    };
    let product_type = spec
        .product_type
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PRODUCT);
    let product = config.product_rates(product_type);
    let qty = Decimal::from(quantity);
    let mut notes: Vec<String> = Vec::new();

    // Step 1: print method
    let (print_method, print_method_reason) =
        select_print_method(quantity, config.print_method.threshold_quantity);
    let method = config.method_rates(print_method);

    // Step 2: base costs
    let material_cost = product.material_per_unit * qty;
    let mut print_cost = product.print_per_unit * qty * method.cost_multiplier;
    let setup_cost = method.setup_cost;
    let mut finishing_cost = product.finishing_per_unit * qty;

    // Step 3: modifiers touch ink/press/coating effort, not substrate or setup
    let mut modifier = Decimal::ONE;
    if spec.sides == Some(Sides::Double) {
        modifier *= config
            .modifiers
            .get("double_sided")
            .copied()
            .unwrap_or(DEFAULT_DOUBLE_SIDED);
        notes.push("Double-sided printing applied".to_string());
    }
    if let Some(color_mode) = spec.color_mode {
        modifier *= config
            .modifiers
            .get(color_mode.as_str())
            .copied()
            .unwrap_or(Decimal::ONE);
    }
    if let Some(finish) = spec.finish.as_deref().filter(|f| !f.is_empty()) {
        modifier *= finish_modifier(finish, &config.modifiers).unwrap_or(Decimal::ONE);
    }
    print_cost *= modifier;
    finishing_cost *= modifier;

    // Step 4: options
    let mut option_costs: IndexMap<String, Decimal> = IndexMap::new();
    for option in &spec.options {
        match config.options.get(option) {
            Some(rate) => {
                option_costs.insert(option.clone(), option_cost(rate, qty));
            }
            None => {
                warn!("Unknown option '{}' - not priced", option);
                notes.push(format!("Option '{}' not in pricing catalog", option));
            }
        }
    }

    // Step 5
    let options_total: Decimal = option_costs.values().copied().sum();
    let pre_discount_total =
        material_cost + print_cost + setup_cost + finishing_cost + options_total;

    // Step 6: highest tier wins, never cumulative
    let quantity_discount = match discount_tier(&config.quantity_discounts, quantity) {
        Some(tier) => {
            notes.push(format!(
                "{}% volume discount applied",
                whole_percent(tier.discount)
            ));
            -pre_discount_total * tier.discount
        }
        None => Decimal::ZERO,
    };

    // Step 7: rush is a surcharge on the discounted price
    let rush_fee = match RushClass::classify(spec.is_rush, spec.turnaround_days) {
        Some(class) => {
            let surcharge = class.multiplier(&config.rush_pricing) - Decimal::ONE;
            notes.push(format!(
                "{} rush fee applied ({}% surcharge)",
                class.label(),
                whole_percent(surcharge)
            ));
            (pre_discount_total + quantity_discount) * surcharge
        }
        None => Decimal::ZERO,
    };

    // Step 8
    let cost_subtotal = pre_discount_total + quantity_discount + rush_fee;
    let margin_amount = cost_subtotal * config.margin_percent;

    // Step 9: the floor replaces the subtotal outright
    let mut subtotal = cost_subtotal + margin_amount;
    if subtotal < product.minimum_price {
        subtotal = product.minimum_price;
        notes.push(format!(
            "Minimum order price of {} {} applied",
            round_money(product.minimum_price, 2),
            config.currency
        ));
    }

    // Step 10
    let tax = subtotal * config.tax_rate;
    let total = subtotal + tax;

    debug!(
        "Priced {} x{} via {}: subtotal={} total={}",
        product_type,
        quantity,
        print_method.as_str(),
        subtotal,
        total
    );

    let breakdown = PricingBreakdown {
        material_cost: round_money(material_cost, 2),
        print_cost: round_money(print_cost, 2),
        setup_cost: round_money(setup_cost, 2),
        finishing_cost: round_money(finishing_cost, 2),
        option_costs: option_costs
            .into_iter()
            .map(|(name, cost)| (name, round_money(cost, 2)))
            .collect(),
        rush_fee: round_money(rush_fee, 2),
        quantity_discount: round_money(quantity_discount, 2),
        margin_amount: round_money(margin_amount, 2),
        margin_percent: (config.margin_percent * dec!(100)).normalize(),
    };

    Ok(PriceEstimate {
        print_method,
        print_method_reason,
        breakdown,
        subtotal: round_money(subtotal, 2),
        tax: round_money(tax, 2),
        total: round_money(total, 2),
        currency: config.currency.clone(),
        estimate_notes: notes,
    })
}

/// Overall outcome of an estimate request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Success,
    ValidationErrors,
    ExtractionFailed,
}

/// Validation plus (when priceable) an estimate
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOutcome {
    pub status: EstimateStatus,
    pub validation: ValidationResult,
    pub estimate: Option<PriceEstimate>,
}

/// Validate a specification and price it when product type and quantity
/// are both present, regardless of other validation errors.
///
/// A pricing failure is reported as a validation warning, never as an error
/// of the request itself.
pub fn run_estimate_pipeline(
    specs: Option<&Specification>,
    config: &PricingConfig,
) -> EstimateOutcome {
    let Some(spec) = specs else {
        return EstimateOutcome {
            status: EstimateStatus::ExtractionFailed,
            validation: validate_specs(None),
            estimate: None,
        };
    };

    let mut validation = validate_specs(Some(spec));

    let estimate = if spec.is_priceable() {
        match calculate_price(spec, config) {
            Ok(estimate) => Some(estimate),
            Err(e) => {
                error!("Pricing calculation failed: {}", e);
                validation
                    .warnings
                    .push(format!("Could not calculate price: {}", e));
                None
            }
        }
    } else {
        None
    };

    let status = if validation.is_valid {
        EstimateStatus::Success
    } else {
        EstimateStatus::ValidationErrors
    };

    EstimateOutcome {
        status,
        validation,
        estimate,
    }
}
