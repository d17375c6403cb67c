//! Models module
//!
//! Defines the inferred resource graph handed to code renderers.

pub mod field;
pub mod resource;

pub use field::{EMPTY_STRING_INT, FieldInfo, types};
pub use resource::{Resource, SETTING_PREFIX, StructType, TypeRegistry, seed_fields};
