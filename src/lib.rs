//! UniFi codegen - typed resource models from controller field definitions
//!
//! Provides:
//! - Identifier canonicalization with swappable acronym tables
//! - Validation pattern classification and rule composition
//! - Field type inference over nested field-definition documents
//! - YAML customization layers and built-in resource behaviour
//! - The client method surface derived from the final resource set

pub mod cli;
pub mod client;
pub mod config;
pub mod customize;
pub mod inference;
pub mod loader;
pub mod models;
pub mod naming;
pub mod validation;

// Re-export commonly used types
pub use client::{ClientSurface, ClientSurfaceBuilder, FunctionParam, MethodDescriptor};
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use customize::{CodeCustomizer, CustomizationError, FieldPipeline, OverrideRule};
pub use inference::{FieldInferrer, InferenceError};
pub use loader::{LoaderError, ResourceLoader, build_resources};
pub use models::{FieldInfo, Resource, StructType, TypeRegistry};
pub use naming::NameCorrections;
pub use validation::{Shape, classify};
