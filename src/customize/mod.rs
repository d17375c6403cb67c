//! Customization engine
//!
//! Layers YAML override documents onto inferred resources.
//!
//! ## Layers
//!
//! - **Defaults** - the document shipped with the generator, always loaded
//! - **User** - an optional document with the same shape, loaded second
//!
//! Each layer contributes, per resource, a generic `_all` rule followed by
//! field-specific rules. Both layers are inserted ahead of any built-in
//! rules already installed on the resource.
//!
//! ## Example
//!
//! ```rust,ignore
//! use unifi_codegen::customize::CodeCustomizer;
//! use unifi_codegen::models::Resource;
//!
//! let customizer = CodeCustomizer::new(None)?;
//! let mut device = Resource::new("Device", "device");
//! customizer.apply_to_resource(&mut device);
//! assert!(!customizer.is_excluded_from_client("Device"));
//! ```

mod document;
mod error;
mod pipeline;

use std::path::Path;

use tracing::debug;

pub use document::{
    ALL_FIELDS, ClientCustomization, Customizations, DEFAULT_CUSTOMIZATIONS, FieldCustomization,
    FieldOverride, ResourceCustomization, exclusion_matches,
};
pub use error::{CustomizationError, CustomizationResult};
pub use pipeline::{FieldPipeline, OverrideRule};

use crate::client::MethodDescriptor;
use crate::models::Resource;

/// Loaded customization layers, in application order
#[derive(Debug, Clone, Default)]
pub struct CodeCustomizer {
    layers: Vec<Customizations>,
}

impl CodeCustomizer {
    /// Load the default layer and, when given, the user document at `path`
    pub fn new(path: Option<&Path>) -> CustomizationResult<Self> {
        let mut customizer = Self::defaults()?;
        if let Some(path) = path {
            debug!("Loading customizations from {}", path.display());
            customizer.push_layer(Customizations::load(path)?);
        }
        Ok(customizer)
    }

    /// Only the default layer
    pub fn defaults() -> CustomizationResult<Self> {
        Ok(Self {
            layers: vec![Customizations::defaults()?],
        })
    }

    /// No layers at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Default layer followed by an inline user document
    pub fn from_yaml(yaml: &str) -> CustomizationResult<Self> {
        let mut customizer = Self::defaults()?;
        customizer.push_layer(Customizations::from_yaml(yaml)?);
        Ok(customizer)
    }

    pub fn push_layer(&mut self, layer: Customizations) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Customizations] {
        &self.layers
    }

    /// Attach this resource's document rules to its pipeline and apply any
    /// resource path override. Resources without an entry are untouched.
    pub fn apply_to_resource(&self, resource: &mut Resource) {
        for layer in &self.layers {
            let Some(customization) = layer.resource(&resource.name) else {
                continue;
            };

            if let Some(path) = &customization.resource_path {
                debug!("Overriding resource path of {} with {}", resource.name, path);
                resource.resource_path = path.clone();
                if let Some(base) = resource.types.get_mut(&resource.name) {
                    base.json_name = path.clone();
                }
            }

            let rules = OverrideRule::from_resource(customization);
            if !rules.is_empty() {
                debug!(
                    "Applying {} customization rule(s) to {}",
                    rules.len(),
                    resource.name
                );
                resource.pipeline.insert_before_builtins(rules);
            }
        }
    }

    /// Whether any layer's exclusion list matches `resource_name`
    pub fn is_excluded_from_client(&self, resource_name: &str) -> bool {
        self.layers
            .iter()
            .filter_map(|layer| layer.client.as_ref())
            .any(|client| client.excludes(resource_name))
    }

    /// Extra client imports, default layer first, without duplicates
    pub fn client_imports(&self) -> Vec<String> {
        let mut imports: Vec<String> = Vec::new();
        for client in self.layers.iter().filter_map(|layer| layer.client.as_ref()) {
            for import in &client.imports {
                if !imports.contains(import) {
                    imports.push(import.clone());
                }
            }
        }
        imports
    }

    /// Hand-written client functions declared across all layers
    pub fn client_functions(&self) -> Vec<MethodDescriptor> {
        self.layers
            .iter()
            .filter_map(|layer| layer.client.as_ref())
            .flat_map(|client| client.functions.iter().cloned())
            .collect()
    }
}
