//! Customization document model
//!
//! ```yaml
//! customizations:
//!   resources:
//!     Device:
//!       resourcePath: device
//!       fields:
//!         _all:
//!           omitEmpty: true
//!         Channel:
//!           ifFieldType: string
//!           customUnmarshalType: numberOrString
//!   client:
//!     imports: [context]
//!     functions: []
//!     excludeResources: ["HeatMap*"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{CustomizationError, CustomizationResult};
use crate::client::MethodDescriptor;
use crate::models::FieldInfo;

/// Field key whose overrides apply to every field of a resource
pub const ALL_FIELDS: &str = "_all";

/// The built-in customization document
pub const DEFAULT_CUSTOMIZATIONS: &str = include_str!("customizations.yml");

/// Top-level document wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    customizations: Option<Customizations>,
}

/// One customization layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customizations {
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceCustomization>,
    #[serde(default)]
    pub client: Option<ClientCustomization>,
}

impl Customizations {
    /// Parse a YAML document. Map keys are copied into the entries' own
    /// name fields.
    pub fn from_yaml(yaml: &str) -> CustomizationResult<Self> {
        let document: Document = serde_yaml::from_str(yaml)?;
        let mut customizations = document.customizations.unwrap_or_default();
        for (resource_name, resource) in customizations.resources.iter_mut() {
            resource.name = resource_name.clone();
            for (field_name, field) in resource.fields.iter_mut() {
                field.name = field_name.clone();
            }
        }
        Ok(customizations)
    }

    /// Read and parse a YAML document from disk
    pub fn load(path: &Path) -> CustomizationResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CustomizationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// The built-in layer
    pub fn defaults() -> CustomizationResult<Self> {
        Self::from_yaml(DEFAULT_CUSTOMIZATIONS)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceCustomization> {
        self.resources.get(name)
    }
}

/// Overrides for one resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCustomization {
    #[serde(skip)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldCustomization>,
}

impl ResourceCustomization {
    /// The `_all` entry, if any
    pub fn all_fields(&self) -> Option<&FieldCustomization> {
        self.fields.get(ALL_FIELDS)
    }

    /// Field entries excluding `_all`
    pub fn field_entries(&self) -> BTreeMap<String, FieldCustomization> {
        self.fields
            .iter()
            .filter(|(name, _)| name.as_str() != ALL_FIELDS)
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect()
    }
}

/// Overrides for one field, optionally guarded by the field's current type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCustomization {
    #[serde(skip)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_field_type: Option<String>,
    #[serde(flatten)]
    pub overrides: FieldOverride,
}

impl FieldCustomization {
    /// Whether the type guard admits `field` as it currently stands
    pub fn applies_to(&self, field: &FieldInfo) -> bool {
        match self.if_field_type.as_deref() {
            None | Some("") => true,
            Some(guard) => guard == field.field_type,
        }
    }

    /// Apply the overrides if the guard admits the field
    pub fn apply(&self, field: &mut FieldInfo) -> bool {
        if !self.applies_to(field) {
            return false;
        }
        self.overrides.apply(field);
        true
    }
}

/// Attribute overrides; unset attributes are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_unmarshal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_unmarshal_func: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
}

impl FieldOverride {
    pub fn apply(&self, field: &mut FieldInfo) {
        if let Some(field_type) = &self.field_type {
            field.field_type = field_type.clone();
        }
        if let Some(unmarshal_type) = &self.custom_unmarshal_type {
            field.custom_unmarshal_type = Some(unmarshal_type.clone());
        }
        if let Some(omit_empty) = self.omit_empty {
            field.omit_empty = omit_empty;
        }
        if let Some(unmarshal_func) = &self.custom_unmarshal_func {
            field.custom_unmarshal_func = Some(unmarshal_func.clone());
        }
        if let Some(field_name) = &self.field_name {
            field.field_name = field_name.clone();
        }
        if let Some(json_path) = &self.json_path {
            field.json_name = json_path.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FieldOverride::default()
    }
}

/// Client-level section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCustomization {
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub functions: Vec<MethodDescriptor>,
    #[serde(default)]
    pub exclude_resources: Vec<String>,
}

impl ClientCustomization {
    pub fn excludes(&self, resource_name: &str) -> bool {
        self.exclude_resources
            .iter()
            .any(|pattern| exclusion_matches(pattern, resource_name))
    }
}

/// Match a resource name against an exclusion entry.
///
/// `*Foo*` matches names containing `Foo`, `*Foo` names ending in `Foo`,
/// `Foo*` names starting with `Foo`, and `Foo` only `Foo` itself.
pub fn exclusion_matches(pattern: &str, resource_name: &str) -> bool {
    let leading = pattern.strip_prefix('*');
    let trailing = pattern.strip_suffix('*');
    match (leading, trailing) {
        (Some(_), Some(_)) if pattern.len() >= 2 => {
            resource_name.contains(&pattern[1..pattern.len() - 1])
        }
        (Some(suffix), _) => resource_name.ends_with(suffix),
        (None, Some(prefix)) => resource_name.starts_with(prefix),
        (None, None) => resource_name == pattern,
    }
}
