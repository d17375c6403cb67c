//! Error types for customization loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading customization documents
#[derive(Error, Debug)]
pub enum CustomizationError {
    /// Failed to read a customization file
    #[error("failed reading customizations file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML
    #[error("failed unmarshalling YAML to customizations: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for CustomizationError {
    fn from(e: serde_yaml::Error) -> Self {
        CustomizationError::Parse(e.to_string())
    }
}

/// Result type for customization operations
pub type CustomizationResult<T> = Result<T, CustomizationError>;
