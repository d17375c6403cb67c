//! Field inference from controller field definitions
//!
//! Each input document maps JSON keys to validation strings, nested
//! objects, or single-element arrays of those. Inference turns it into a
//! typed field tree on a [`Resource`](crate::models::Resource).
//!
//! ## Features
//!
//! - **Scalar typing** - bool, int and float64 sniffed from the validation string
//! - **Constraints** - validation rules derived from recognized pattern shapes
//! - **Nested types** - objects become struct types named after their container
//! - **Built-ins** - resource-specific seed fields and override rules
//!
//! ## Example
//!
//! ```rust,ignore
//! use unifi_codegen::inference::FieldInferrer;
//! use unifi_codegen::models::Resource;
//!
//! let mut resource = Resource::new("Network", "networkconf");
//! FieldInferrer::default().infer_json(&mut resource, r#"{"purpose": "corporate|guest"}"#)?;
//! ```

pub mod builtin;
mod error;
mod inferrer;

pub use builtin::{BuiltInRule, install_builtins};
pub use error::{InferenceError, InferenceResult};
pub use inferrer::FieldInferrer;
