//! Validation pattern handling
//!
//! Provides:
//! - Shape classification of controller validation strings
//! - Numeric sniffing used by field type inference
//! - Composition of runtime validation rules

pub mod classifier;
pub mod rule;

pub use classifier::{Shape, classify, field_validation, numeric_sample, trim_wrappers};
pub use rule::{Validation, Validator, compose, to_tag};
