//! Core pricing calculation functions.
//!
//! Pure functions for the individual pricing rules - no config loading, no I/O.
//! [`super::services::calculate_price`] sequences them.

use indexmap::IndexMap;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::PrintMethod;

use super::config::{DiscountTier, OptionPricing, OptionRate, RushPricing};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use print_estimator::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Whole percentage for a fraction, truncated (0.125 -> 12)
pub fn whole_percent(fraction: Decimal) -> Decimal {
    (fraction * dec!(100)).trunc().normalize()
}

/// Choose digital or offset printing from the quantity threshold.
///
/// Returns the method plus a human-readable justification.
pub fn select_print_method(quantity: i64, threshold: i64) -> (PrintMethod, String) {
    if quantity < threshold {
        (
            PrintMethod::Digital,
            format!(
                "Digital printing selected: quantity ({}) below {} threshold. \
                 Faster turnaround, no plate setup required.",
                quantity, threshold
            ),
        )
    } else {
        (
            PrintMethod::Offset,
            format!(
                "Offset printing selected: quantity ({}) at or above {} threshold. \
                 Lower per-unit cost at scale, requires plate setup.",
                quantity, threshold
            ),
        )
    }
}

/// Look up the modifier for a finish name.
///
/// Two explicit steps: the raw name (`uncoated`), then the normalized
/// `<name>_finish` key (`gloss` -> `gloss_finish`). `None` when neither is
/// configured; callers treat that as a factor of 1.0.
pub fn finish_modifier(finish: &str, modifiers: &IndexMap<String, Decimal>) -> Option<Decimal> {
    if let Some(factor) = modifiers.get(finish) {
        return Some(*factor);
    }
    if finish.ends_with("_finish") {
        return None;
    }
    modifiers.get(&format!("{}_finish", finish)).copied()
}

/// Cost of one option at the given quantity
pub fn option_cost(rate: &OptionRate, quantity: Decimal) -> Decimal {
    match rate.pricing {
        OptionPricing::Flat => rate.price,
        OptionPricing::PerUnit => rate.price * quantity,
    }
}

/// Highest applicable discount tier.
///
/// Tiers are scanned from the largest `min_quantity` down and the first one
/// the quantity reaches wins. Discounts never stack.
pub fn discount_tier(tiers: &[DiscountTier], quantity: i64) -> Option<&DiscountTier> {
    let mut sorted: Vec<&DiscountTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));
    sorted.into_iter().find(|tier| quantity >= tier.min_quantity)
}

/// Turnaround class that selects a rush multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushClass {
    SameDay,
    NextDay,
    TwoDay,
    /// Rush flag set without a qualifying turnaround; priced as next-day
    Flagged,
}

impl RushClass {
    /// Classify a request, or `None` when no rush fee applies.
    ///
    /// Rush applies when the flag is set or turnaround is at most 2 days.
    pub fn classify(is_rush: bool, turnaround_days: Option<i64>) -> Option<Self> {
        let expedited = turnaround_days.is_some_and(|days| days <= 2);
        if !is_rush && !expedited {
            return None;
        }
        Some(match turnaround_days {
            Some(0) => RushClass::SameDay,
            Some(1) => RushClass::NextDay,
            Some(2) => RushClass::TwoDay,
            _ => RushClass::Flagged,
        })
    }

    pub fn multiplier(&self, pricing: &RushPricing) -> Decimal {
        match self {
            RushClass::SameDay => pricing.same_day,
            RushClass::NextDay | RushClass::Flagged => pricing.next_day,
            RushClass::TwoDay => pricing.two_day,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RushClass::SameDay => "Same-day",
            RushClass::NextDay => "Next-day",
            RushClass::TwoDay => "2-day",
            RushClass::Flagged => "Rush",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(0.125), 2), dec!(0.12));
        assert_eq!(round_money(dec!(0.135), 2), dec!(0.14));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(-1.234), 2), dec!(-1.23));
        assert_eq!(round_money(dec!(999999.995), 2), dec!(1000000.00));
    }

    #[test]
    fn test_whole_percent_truncates() {
        assert_eq!(whole_percent(dec!(0.10)).to_string(), "10");
        assert_eq!(whole_percent(dec!(0.25)).to_string(), "25");
        assert_eq!(whole_percent(dec!(0.125)).to_string(), "12");
        assert_eq!(whole_percent(dec!(1.0)).to_string(), "100");
    }

    // ==================== select_print_method tests ====================

    #[test]
    fn test_select_print_method_threshold() {
        let (method, reason) = select_print_method(499, 500);
        assert_eq!(method, PrintMethod::Digital);
        assert!(reason.contains("(499)"));
        assert!(reason.contains("500"));

        let (method, reason) = select_print_method(500, 500);
        assert_eq!(method, PrintMethod::Offset);
        assert!(reason.contains("at or above 500"));
    }

    // ==================== finish_modifier tests ====================

    fn modifiers() -> IndexMap<String, Decimal> {
        IndexMap::from([
            ("gloss_finish".to_string(), dec!(1.1)),
            ("uncoated".to_string(), dec!(0.9)),
        ])
    }

    #[test]
    fn test_finish_modifier_normalized_key() {
        assert_eq!(finish_modifier("gloss", &modifiers()), Some(dec!(1.1)));
        assert_eq!(finish_modifier("gloss_finish", &modifiers()), Some(dec!(1.1)));
    }

    #[test]
    fn test_finish_modifier_raw_key() {
        assert_eq!(finish_modifier("uncoated", &modifiers()), Some(dec!(0.9)));
    }

    #[test]
    fn test_finish_modifier_raw_key_wins() {
        let mut mods = modifiers();
        mods.insert("satin".to_string(), dec!(1.2));
        mods.insert("satin_finish".to_string(), dec!(1.05));
        assert_eq!(finish_modifier("satin", &mods), Some(dec!(1.2)));
    }

    #[test]
    fn test_finish_modifier_unknown() {
        assert_eq!(finish_modifier("velvet", &modifiers()), None);
        assert_eq!(finish_modifier("velvet_finish", &modifiers()), None);
    }

    // ==================== option_cost tests ====================

    #[test]
    fn test_option_cost_flat_ignores_quantity() {
        let rate = OptionRate::flat(dec!(15.00));
        assert_eq!(option_cost(&rate, dec!(100)), dec!(15.00));
        assert_eq!(option_cost(&rate, dec!(1000)), dec!(15.00));
    }

    #[test]
    fn test_option_cost_per_unit_scales() {
        let rate = OptionRate::per_unit(dec!(0.08));
        assert_eq!(option_cost(&rate, dec!(100)), dec!(8.00));
        assert_eq!(option_cost(&rate, dec!(1000)), dec!(80.00));
    }

    // ==================== discount_tier tests ====================

    fn tiers() -> Vec<DiscountTier> {
        // Deliberately unsorted
        vec![
            DiscountTier { min_quantity: 1000, discount: dec!(0.15) },
            DiscountTier { min_quantity: 250, discount: dec!(0.05) },
            DiscountTier { min_quantity: 500, discount: dec!(0.10) },
        ]
    }

    #[test]
    fn test_discount_tier_highest_applicable() {
        assert!(discount_tier(&tiers(), 249).is_none());
        assert_eq!(discount_tier(&tiers(), 250).unwrap().discount, dec!(0.05));
        assert_eq!(discount_tier(&tiers(), 999).unwrap().discount, dec!(0.10));
        assert_eq!(discount_tier(&tiers(), 50000).unwrap().discount, dec!(0.15));
    }

    #[test]
    fn test_discount_tier_empty() {
        assert!(discount_tier(&[], 10000).is_none());
    }

    // ==================== RushClass tests ====================

    #[test]
    fn test_rush_class_by_turnaround() {
        assert_eq!(RushClass::classify(false, Some(0)), Some(RushClass::SameDay));
        assert_eq!(RushClass::classify(false, Some(1)), Some(RushClass::NextDay));
        assert_eq!(RushClass::classify(false, Some(2)), Some(RushClass::TwoDay));
        assert_eq!(RushClass::classify(false, Some(3)), None);
        assert_eq!(RushClass::classify(false, None), None);
    }

    #[test]
    fn test_rush_flag_without_turnaround_is_next_day() {
        let class = RushClass::classify(true, None).unwrap();
        assert_eq!(class, RushClass::Flagged);
        assert_eq!(class.multiplier(&RushPricing::default()), dec!(1.5));

        let class = RushClass::classify(true, Some(5)).unwrap();
        assert_eq!(class.multiplier(&RushPricing::default()), dec!(1.5));
    }

    #[test]
    fn test_rush_multipliers() {
        let pricing = RushPricing::default();
        assert_eq!(RushClass::SameDay.multiplier(&pricing), dec!(2.0));
        assert_eq!(RushClass::NextDay.multiplier(&pricing), dec!(1.5));
        assert_eq!(RushClass::TwoDay.multiplier(&pricing), dec!(1.25));
    }
}
