//! Domain models shared by the validator and the pricing engine.

pub mod estimate;
pub mod specification;
pub mod validation;

pub use estimate::{PriceEstimate, PricingBreakdown, PrintMethod};
pub use specification::{ColorMode, Sides, Specification};
pub use validation::ValidationResult;
