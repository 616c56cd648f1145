//! Hard-coded business policy for specification validation.
//!
//! These are policy, not rates: pricing numbers live in the pricing config,
//! these whitelists and limits do not.

/// Product types accepted for ordering, sorted
pub const VALID_PRODUCT_TYPES: &[&str] = &[
    "banners",
    "booklets",
    "brochures",
    "business_cards",
    "catalogs",
    "envelopes",
    "flyers",
    "folders",
    "letterhead",
    "magazines",
    "notepads",
    "postcards",
    "posters",
    "stickers",
];

/// Options with pricing rules
pub const VALID_OPTIONS: &[&str] = &[
    "rounded_corners",
    "foil_stamping",
    "embossing",
    "spot_uv",
    "die_cut",
    "hole_punch",
    "scoring",
    "perforation",
    "lamination",
    "uv_coating",
];

/// Options needing 5+ business days; incompatible with rush turnaround
pub const SLOW_OPTIONS: &[&str] = &["die_cut", "embossing", "foil_stamping"];

/// Options that trigger the production-time notice
pub const SPECIALTY_FINISH_OPTIONS: &[&str] = &["foil_stamping", "embossing"];

/// Lamination after embossing flattens the emboss
pub const INCOMPATIBLE_OPTION_PAIRS: &[(&str, &str, &str)] = &[(
    "embossing",
    "lamination",
    "Embossing and lamination together may affect emboss visibility",
)];

/// Below this DPI artwork is unprintable
pub const MIN_ARTWORK_DPI: i64 = 200;

/// Recommended DPI for professional output
pub const RECOMMENDED_ARTWORK_DPI: i64 = 300;

/// Turnaround at or below this many days is a rush
pub const RUSH_TURNAROUND_DAYS: i64 = 2;

/// Orders this large get the custom-quote notice
pub const LARGE_ORDER_QUANTITY: i64 = 5000;

/// Inclusive quantity range for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityLimits {
    pub min: i64,
    pub max: i64,
}

const DEFAULT_LIMITS: QuantityLimits = QuantityLimits { min: 1, max: 100_000 };

/// Quantity range for a product, falling back to 1..=100000
pub fn quantity_limits(product_type: Option<&str>) -> QuantityLimits {
    let (min, max) = match product_type {
        Some("business_cards") => (100, 100_000),
        Some("flyers") => (50, 500_000),
        Some("posters") => (1, 10_000),
        Some("brochures") => (50, 100_000),
        Some("booklets") => (25, 50_000),
        Some("stickers") => (50, 500_000),
        Some("banners") => (1, 500),
        Some("postcards") => (100, 500_000),
        _ => return DEFAULT_LIMITS,
    };
    QuantityLimits { min, max }
}

/// Standard sizes, for products that have a registered list
pub fn standard_sizes(product_type: &str) -> Option<&'static [&'static str]> {
    match product_type {
        "business_cards" => Some(&["3.5x2", "2x3.5", "3x3"]),
        "flyers" => Some(&["8.5x11", "5.5x8.5", "4x6", "11x17"]),
        "posters" => Some(&["11x17", "18x24", "24x36"]),
        "postcards" => Some(&["4x6", "5x7", "6x9"]),
        _ => None,
    }
}

pub fn is_known_product(product_type: &str) -> bool {
    VALID_PRODUCT_TYPES.contains(&product_type)
}

pub fn is_known_option(option: &str) -> bool {
    VALID_OPTIONS.contains(&option)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_whitelist_sorted() {
        let mut sorted = VALID_PRODUCT_TYPES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, VALID_PRODUCT_TYPES);
    }

    #[test]
    fn test_quantity_limits_fallback() {
        assert_eq!(quantity_limits(Some("banners")), QuantityLimits { min: 1, max: 500 });
        assert_eq!(quantity_limits(Some("catalogs")), DEFAULT_LIMITS);
        assert_eq!(quantity_limits(None), DEFAULT_LIMITS);
    }

    #[test]
    fn test_slow_options_are_known() {
        for option in SLOW_OPTIONS.iter().chain(SPECIALTY_FINISH_OPTIONS) {
            assert!(is_known_option(option));
        }
    }
}
