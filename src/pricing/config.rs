//! Pricing configuration schema and loading.
//!
//! The config is a JSON document (see `data/pricing.json`). A missing or
//! malformed document falls back to [`PricingConfig::embedded_default`] so
//! the service always starts. Once built, a config is never mutated; reloads
//! build a new one.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Product key used for unknown or absent product types
pub const DEFAULT_PRODUCT: &str = "default";

/// Config loading failures. The loader logs these and falls back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("pricing config not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read pricing config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pricing config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-unit base rates for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRates {
    pub material_per_unit: Decimal,
    pub print_per_unit: Decimal,
    pub finishing_per_unit: Decimal,
    #[serde(default = "default_minimum_quantity")]
    pub minimum_quantity: i64,
    #[serde(default = "default_minimum_price")]
    pub minimum_price: Decimal,
    #[serde(default = "default_size")]
    pub default_size: String,
}

fn default_minimum_quantity() -> i64 {
    1
}

fn default_minimum_price() -> Decimal {
    dec!(25.00)
}

fn default_size() -> String {
    "8.5x11".to_string()
}

impl ProductRates {
    /// Rates for the generic `default` product
    pub fn generic() -> Self {
        Self {
            material_per_unit: dec!(0.05),
            print_per_unit: dec!(0.10),
            finishing_per_unit: dec!(0.03),
            minimum_quantity: 1,
            minimum_price: dec!(25.00),
            default_size: "8.5x11".to_string(),
        }
    }
}

/// Setup and per-unit multiplier for one print method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRates {
    pub setup_cost: Decimal,
    #[serde(default = "unit_multiplier")]
    pub cost_multiplier: Decimal,
}

fn unit_multiplier() -> Decimal {
    Decimal::ONE
}

/// Digital vs offset parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintMethodConfig {
    #[serde(default = "default_digital")]
    pub digital: MethodRates,
    #[serde(default = "default_offset")]
    pub offset: MethodRates,
    /// Digital below, offset at or above
    #[serde(default = "default_threshold")]
    pub threshold_quantity: i64,
}

fn default_digital() -> MethodRates {
    MethodRates {
        setup_cost: dec!(15.00),
        cost_multiplier: dec!(1.0),
    }
}

fn default_offset() -> MethodRates {
    MethodRates {
        setup_cost: dec!(150.00),
        cost_multiplier: dec!(0.6),
    }
}

fn default_threshold() -> i64 {
    500
}

impl Default for PrintMethodConfig {
    fn default() -> Self {
        Self {
            digital: default_digital(),
            offset: default_offset(),
            threshold_quantity: default_threshold(),
        }
    }
}

/// How an option's price scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionPricing {
    /// One fee regardless of quantity
    Flat,
    /// Price times quantity
    PerUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRate {
    pub price: Decimal,
    #[serde(rename = "type")]
    pub pricing: OptionPricing,
}

impl OptionRate {
    pub fn flat(price: Decimal) -> Self {
        Self {
            price,
            pricing: OptionPricing::Flat,
        }
    }

    pub fn per_unit(price: Decimal) -> Self {
        Self {
            price,
            pricing: OptionPricing::PerUnit,
        }
    }
}

/// Volume discount rule: orders of at least `min_quantity` get `discount` off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: i64,
    pub discount: Decimal,
}

/// Rush multipliers by turnaround class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushPricing {
    #[serde(default = "same_day_multiplier")]
    pub same_day: Decimal,
    #[serde(default = "next_day_multiplier")]
    pub next_day: Decimal,
    #[serde(rename = "2_day", default = "two_day_multiplier")]
    pub two_day: Decimal,
    #[serde(default = "unit_multiplier")]
    pub standard: Decimal,
}

fn same_day_multiplier() -> Decimal {
    dec!(2.0)
}

fn next_day_multiplier() -> Decimal {
    dec!(1.5)
}

fn two_day_multiplier() -> Decimal {
    dec!(1.25)
}

impl Default for RushPricing {
    fn default() -> Self {
        Self {
            same_day: same_day_multiplier(),
            next_day: next_day_multiplier(),
            two_day: two_day_multiplier(),
            standard: unit_multiplier(),
        }
    }
}

/// Complete pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub products: IndexMap<String, ProductRates>,
    #[serde(default)]
    pub print_method: PrintMethodConfig,
    #[serde(default)]
    pub options: IndexMap<String, OptionRate>,
    /// Multiplicative factors keyed by attribute value
    #[serde(default)]
    pub modifiers: IndexMap<String, Decimal>,
    #[serde(default)]
    pub quantity_discounts: Vec<DiscountTier>,
    #[serde(default)]
    pub rush_pricing: RushPricing,
    #[serde(default = "default_margin")]
    pub margin_percent: Decimal,
    #[serde(default)]
    pub tax_rate: Decimal,
}

fn default_version() -> String {
    "default".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_margin() -> Decimal {
    dec!(0.30)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::embedded_default()
    }
}

impl PricingConfig {
    /// Fallback configuration with typical commercial printing rates (USD).
    ///
    /// Used when the config document is missing or invalid.
    pub fn embedded_default() -> Self {
        let product = |material, print, finishing, minimum_quantity, minimum_price, size: &str| {
            ProductRates {
                material_per_unit: material,
                print_per_unit: print,
                finishing_per_unit: finishing,
                minimum_quantity,
                minimum_price,
                default_size: size.to_string(),
            }
        };

        let products = IndexMap::from([
            (
                "business_cards".to_string(),
                product(dec!(0.02), dec!(0.04), dec!(0.02), 100, dec!(29.99), "3.5x2"),
            ),
            (
                "flyers".to_string(),
                product(dec!(0.03), dec!(0.08), dec!(0.02), 50, dec!(35.00), "8.5x11"),
            ),
            (
                "brochures".to_string(),
                product(dec!(0.08), dec!(0.15), dec!(0.05), 50, dec!(75.00), "8.5x11"),
            ),
            (
                "posters".to_string(),
                product(dec!(0.25), dec!(0.50), dec!(0.10), 1, dec!(15.00), "18x24"),
            ),
            (
                "postcards".to_string(),
                product(dec!(0.03), dec!(0.05), dec!(0.02), 100, dec!(30.00), "4x6"),
            ),
            (DEFAULT_PRODUCT.to_string(), ProductRates::generic()),
        ]);

        let options = IndexMap::from([
            ("rounded_corners".to_string(), OptionRate::flat(dec!(15.00))),
            ("foil_stamping".to_string(), OptionRate::per_unit(dec!(0.08))),
            ("embossing".to_string(), OptionRate::per_unit(dec!(0.10))),
            ("spot_uv".to_string(), OptionRate::flat(dec!(25.00))),
            ("die_cut".to_string(), OptionRate::flat(dec!(75.00))),
            ("lamination".to_string(), OptionRate::per_unit(dec!(0.03))),
            ("uv_coating".to_string(), OptionRate::per_unit(dec!(0.02))),
            ("hole_punch".to_string(), OptionRate::flat(dec!(10.00))),
            ("scoring".to_string(), OptionRate::per_unit(dec!(0.01))),
            ("perforation".to_string(), OptionRate::per_unit(dec!(0.02))),
        ]);

        let modifiers = IndexMap::from([
            ("double_sided".to_string(), dec!(1.6)),
            ("full_color".to_string(), dec!(1.0)),
            ("black_white".to_string(), dec!(0.5)),
            ("spot_color".to_string(), dec!(0.75)),
            ("gloss_finish".to_string(), dec!(1.1)),
            ("matte_finish".to_string(), dec!(1.0)),
            ("satin_finish".to_string(), dec!(1.05)),
            ("uncoated".to_string(), dec!(0.9)),
        ]);

        let quantity_discounts = [
            (250, dec!(0.05)),
            (500, dec!(0.10)),
            (1000, dec!(0.15)),
            (5000, dec!(0.20)),
            (10000, dec!(0.25)),
        ]
        .into_iter()
        .map(|(min_quantity, discount)| DiscountTier {
            min_quantity,
            discount,
        })
        .collect();

        Self {
            version: default_version(),
            currency: default_currency(),
            products,
            print_method: PrintMethodConfig::default(),
            options,
            modifiers,
            quantity_discounts,
            rush_pricing: RushPricing::default(),
            margin_percent: default_margin(),
            tax_rate: Decimal::ZERO,
        }
    }

    /// Parse a config document.
    ///
    /// A document without a `default` product gets the generic rates so
    /// unknown products always resolve.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: PricingConfig = serde_json::from_str(json)?;
        if !config.products.contains_key(DEFAULT_PRODUCT) {
            warn!("Pricing config has no '{}' product, using generic rates", DEFAULT_PRODUCT);
            config
                .products
                .insert(DEFAULT_PRODUCT.to_string(), ProductRates::generic());
        }
        Ok(config)
    }

    /// Read and parse a config document from disk
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_json_str(&text)
    }

    /// Load from disk, falling back to the embedded default on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_path(path) {
            Ok(config) => {
                info!(
                    "Loaded pricing config '{}' from {}",
                    config.version,
                    path.display()
                );
                config
            }
            Err(e @ ConfigError::NotFound { .. }) => {
                warn!("{}, using defaults", e);
                Self::embedded_default()
            }
            Err(e) => {
                error!("{}, using defaults", e);
                Self::embedded_default()
            }
        }
    }

    /// Rates for a product, falling back to the `default` product
    pub fn product_rates(&self, product_type: &str) -> Cow<'_, ProductRates> {
        self.products
            .get(product_type)
            .or_else(|| self.products.get(DEFAULT_PRODUCT))
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(ProductRates::generic()))
    }

    pub fn method_rates(&self, method: crate::models::PrintMethod) -> &MethodRates {
        match method {
            crate::models::PrintMethod::Digital => &self.print_method.digital,
            crate::models::PrintMethod::Offset => &self.print_method.offset,
        }
    }
}
