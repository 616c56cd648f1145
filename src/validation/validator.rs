//! Validation of extracted print specifications against business rules.
//!
//! All findings are accumulated; a failing check never hides the ones after
//! it.

use tracing::info;

use crate::models::{Specification, ValidationResult};

use super::rules::{
    is_known_option, is_known_product, quantity_limits, standard_sizes,
    INCOMPATIBLE_OPTION_PAIRS, LARGE_ORDER_QUANTITY, MIN_ARTWORK_DPI, RECOMMENDED_ARTWORK_DPI,
    RUSH_TURNAROUND_DAYS, SLOW_OPTIONS, SPECIALTY_FINISH_OPTIONS, VALID_PRODUCT_TYPES,
};

/// Running set of findings
#[derive(Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
    missing_fields: Vec<String>,
}

impl Findings {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn missing(&mut self, field: &str) {
        self.missing_fields.push(field.to_string());
    }
}

/// Validate a specification.
///
/// Checks, in order: product type, quantity, size, artwork DPI, turnaround
/// (including rush vs slow-option conflicts), options, defaultable fields,
/// then non-blocking business notices. Valid iff no errors were found.
pub fn validate_specs(spec: Option<&Specification>) -> ValidationResult {
    let Some(spec) = spec else {
        return ValidationResult::rejected("No specifications could be extracted from input");
    };

    let mut findings = Findings::default();

    check_product_type(spec, &mut findings);
    check_quantity(spec, &mut findings);
    check_size(spec, &mut findings);
    check_artwork(spec, &mut findings);
    check_turnaround(spec, &mut findings);
    check_options(spec, &mut findings);
    check_defaultable_fields(spec, &mut findings);
    check_business_notices(spec, &mut findings);

    let result = ValidationResult::from_findings(
        findings.errors,
        findings.warnings,
        findings.missing_fields,
    );

    info!(
        "Validation: valid={}, errors={}, warnings={}, missing={}",
        result.is_valid,
        result.errors.len(),
        result.warnings.len(),
        result.missing_fields.len()
    );

    result
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn check_product_type(spec: &Specification, findings: &mut Findings) {
    match non_empty(&spec.product_type) {
        None => findings.error(
            "Product type is required. Examples: business_cards, flyers, posters, brochures",
        ),
        Some(product) if !is_known_product(product) => findings.error(format!(
            "Unknown product type '{}'. Valid types: {}",
            product,
            VALID_PRODUCT_TYPES.join(", ")
        )),
        Some(_) => {}
    }
}

fn check_quantity(spec: &Specification, findings: &mut Findings) {
    let Some(quantity) = spec.quantity else {
        findings.error("Quantity is required");
        return;
    };
    if quantity <= 0 {
        findings.error("Quantity must be a positive number");
        return;
    }

    let product = non_empty(&spec.product_type);
    let limits = quantity_limits(product);
    let label = product.unwrap_or("this product");
    if quantity < limits.min {
        findings.error(format!(
            "Minimum quantity for {} is {} units",
            label, limits.min
        ));
    } else if quantity > limits.max {
        findings.error(format!(
            "Maximum quantity for {} is {}. Contact sales for bulk orders.",
            label, limits.max
        ));
    }
}

fn check_size(spec: &Specification, findings: &mut Findings) {
    let Some(size) = non_empty(&spec.size) else {
        findings.missing("size");
        findings.warn("Size not specified - using standard size for product type");
        return;
    };

    let Some(product) = non_empty(&spec.product_type) else {
        return;
    };
    if let Some(standard) = standard_sizes(product) {
        if !standard.contains(&size) {
            findings.warn(format!(
                "Non-standard size '{}' for {}. Standard sizes: {}. Custom sizing may affect price.",
                size,
                product,
                standard.join(", ")
            ));
        }
    }
}

fn check_artwork(spec: &Specification, findings: &mut Findings) {
    let Some(dpi) = spec.artwork_dpi else {
        return;
    };
    if dpi < MIN_ARTWORK_DPI {
        findings.error(format!(
            "Artwork resolution too low ({} DPI). Minimum {} DPI required, {} DPI recommended. \
             Please provide higher resolution artwork.",
            dpi, MIN_ARTWORK_DPI, RECOMMENDED_ARTWORK_DPI
        ));
    } else if dpi < RECOMMENDED_ARTWORK_DPI {
        findings.warn(format!(
            "Artwork resolution ({} DPI) is below recommended {} DPI. Print quality may be affected.",
            dpi, RECOMMENDED_ARTWORK_DPI
        ));
    }
}

fn check_turnaround(spec: &Specification, findings: &mut Findings) {
    let Some(days) = spec.turnaround_days else {
        return;
    };

    if days < 0 {
        findings.error("Turnaround days cannot be negative");
    } else if days == 0 {
        findings.warn("Same-day turnaround requested. Subject to availability and rush fees apply.");
    } else if days <= RUSH_TURNAROUND_DAYS {
        findings.warn(format!(
            "{}-day rush turnaround. Rush fees will apply.",
            days
        ));
    }

    if days <= RUSH_TURNAROUND_DAYS {
        let conflicting: Vec<&str> = SLOW_OPTIONS
            .iter()
            .copied()
            .filter(|option| spec.has_option(option))
            .collect();
        if !conflicting.is_empty() {
            findings.error(format!(
                "Rush turnaround conflicts with options: {}. These options require 5+ business days.",
                conflicting.join(", ")
            ));
        }
    }
}

fn check_options(spec: &Specification, findings: &mut Findings) {
    let mut unknown: Vec<&str> = spec
        .options
        .iter()
        .map(String::as_str)
        .filter(|option| !is_known_option(option))
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    if !unknown.is_empty() {
        findings.warn(format!(
            "Unknown options will be ignored: {}",
            unknown.join(", ")
        ));
    }

    for (first, second, message) in INCOMPATIBLE_OPTION_PAIRS {
        if spec.has_option(first) && spec.has_option(second) {
            findings.warn(*message);
        }
    }
}

fn check_defaultable_fields(spec: &Specification, findings: &mut Findings) {
    if spec.sides.is_none() {
        findings.missing("sides");
        findings.warn("Sides not specified - defaulting to single-sided");
    }
    if non_empty(&spec.finish).is_none() {
        findings.missing("finish");
        findings.warn("Finish not specified - defaulting to matte");
    }
    if spec.color_mode.is_none() {
        findings.missing("color_mode");
        findings.warn("Color mode not specified - assuming full color");
    }
    // Product default paper is used without surfacing a warning
    if non_empty(&spec.paper_stock).is_none() {
        findings.missing("paper_stock");
    }
}

fn check_business_notices(spec: &Specification, findings: &mut Findings) {
    if spec.quantity.is_some_and(|q| q >= LARGE_ORDER_QUANTITY) {
        findings.warn(
            "Large order: may qualify for additional volume discounts. Contact sales for custom quote.",
        );
    }
    if SPECIALTY_FINISH_OPTIONS
        .iter()
        .any(|option| spec.has_option(option))
    {
        findings.warn("Specialty finishes (foil/emboss) add 5-7 business days to production");
    }
}
