//! Error types for field inference

use thiserror::Error;

/// Errors that can occur during field inference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Invalid JSON structure (not an object at root)
    #[error("Invalid JSON structure: expected object at root, found {0}")]
    InvalidStructure(String),

    /// A value that is neither a validation string, an object nor an array
    #[error("unable to determine type of field {field} from {shape} value")]
    UnsupportedShape { field: String, shape: String },

    /// An array with more than one element has no single element shape
    #[error("unable to determine element type of field {field}: array has {len} elements")]
    AmbiguousArray { field: String, len: usize },
}

impl InferenceError {
    /// The JSON key the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            InferenceError::UnsupportedShape { field, .. }
            | InferenceError::AmbiguousArray { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InferenceError {
    fn from(e: serde_json::Error) -> Self {
        InferenceError::JsonParse(e.to_string())
    }
}

/// Result type for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;
