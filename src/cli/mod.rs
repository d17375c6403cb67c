//! CLI module for the unifi-codegen binary

#[cfg(feature = "cli")]
pub mod output;

#[cfg(feature = "cli")]
pub use output::{GeneratedModel, OutputFormat};
