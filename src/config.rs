//! Configuration for resource generation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::SETTING_PREFIX;
use crate::naming::NameCorrections;

/// Field-definition files never turned into resources
pub const DEFAULT_SKIPPED_FILES: [&str; 3] = ["AuthenticationRequest.json", "Setting.json", "Wall.json"];

/// Configuration for building resources from a fields directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Acronym corrections applied to derived field names
    pub field_corrections: NameCorrections,

    /// Corrections applied to file stems when naming resources
    pub file_corrections: NameCorrections,

    /// File names skipped by the loader
    pub skipped_files: Vec<String>,

    /// Name prefix marking setting resources
    pub setting_prefix: String,

    /// Optional user customization document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations_path: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            field_corrections: NameCorrections::field_defaults(),
            file_corrections: NameCorrections::file_defaults(),
            skipped_files: DEFAULT_SKIPPED_FILES.iter().map(|s| s.to_string()).collect(),
            setting_prefix: SETTING_PREFIX.to_string(),
            customizations_path: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    pub fn is_skipped(&self, file_name: &str) -> bool {
        self.skipped_files.iter().any(|s| s == file_name)
    }
}

/// Builder for GeneratorConfig
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Replace the field-name correction table
    pub fn field_corrections(mut self, corrections: NameCorrections) -> Self {
        self.config.field_corrections = corrections;
        self
    }

    /// Append one field-name correction
    pub fn field_correction(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.config.field_corrections.push(old, new);
        self
    }

    /// Replace the file-name correction table
    pub fn file_corrections(mut self, corrections: NameCorrections) -> Self {
        self.config.file_corrections = corrections;
        self
    }

    /// Skip an additional file name
    pub fn skip_file(mut self, file_name: impl Into<String>) -> Self {
        self.config.skipped_files.push(file_name.into());
        self
    }

    /// Replace the skip list
    pub fn skipped_files(mut self, files: Vec<String>) -> Self {
        self.config.skipped_files = files;
        self
    }

    pub fn setting_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.setting_prefix = prefix.into();
        self
    }

    pub fn customizations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.customizations_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
