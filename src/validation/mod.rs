//! Specification validation.
//!
//! Classifies a (possibly partial) specification into blocking errors,
//! warnings and missing fields. No config, no I/O.

pub mod rules;
pub mod validator;

pub use validator::validate_specs;
