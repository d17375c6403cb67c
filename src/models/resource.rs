//! Resource and type registry model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::{FieldInfo, types};
use crate::customize::FieldPipeline;
use crate::naming::snake_case;

/// Name prefix marking singleton-per-site setting resources
pub const SETTING_PREFIX: &str = "Setting";

/// A generated struct type
///
/// `pinned` fields keep their insertion order and are always listed before
/// the inferred `fields`, which are ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructType {
    pub name: String,
    pub json_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pinned: Vec<FieldInfo>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldInfo>,
}

impl StructType {
    pub fn new(name: impl Into<String>, json_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            json_name: json_name.into(),
            ..Default::default()
        }
    }

    /// Add an inferred field, replacing any field of the same name. A pinned
    /// field of that name is replaced in place and keeps its position.
    pub fn insert(&mut self, field: FieldInfo) {
        if let Some(slot) = self
            .pinned
            .iter_mut()
            .find(|f| f.field_name == field.field_name)
        {
            *slot = field;
            return;
        }
        self.fields.insert(field.field_name.clone(), field);
    }

    /// Add a field to the ordered leading section
    pub fn pin(&mut self, field: FieldInfo) {
        self.pinned.push(field);
    }

    /// Pinned fields first, then inferred fields by name
    pub fn ordered_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.pinned.iter().chain(self.fields.values())
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields
            .get(name)
            .or_else(|| self.pinned.iter().find(|f| f.field_name == name))
    }

    pub fn len(&self) -> usize {
        self.pinned.len() + self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Append-only registry of a resource's struct types, keyed by type name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    types: BTreeMap<String, StructType>,
}

impl TypeRegistry {
    /// Register a type under its own name. Re-registering a name replaces
    /// the previous definition.
    pub fn register(&mut self, def: StructType) {
        self.types.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&StructType> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StructType> {
        self.types.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.types.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// One generated type family rooted at a field-definition document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    pub resource_path: String,
    pub is_setting: bool,
    pub types: TypeRegistry,
    #[serde(skip)]
    pub pipeline: FieldPipeline,
}

impl Resource {
    /// Create a resource using the default setting prefix
    pub fn new(name: impl Into<String>, resource_path: impl Into<String>) -> Self {
        Self::with_setting_prefix(name, resource_path, SETTING_PREFIX)
    }

    /// Create a resource whose root type is seeded with the identity and
    /// visibility fields every controller record carries. Setting resources
    /// address `<prefix-less snake name>` instead of `resource_path`.
    pub fn with_setting_prefix(
        name: impl Into<String>,
        resource_path: impl Into<String>,
        setting_prefix: &str,
    ) -> Self {
        let name = name.into();
        let is_setting = !setting_prefix.is_empty() && name.starts_with(setting_prefix);
        let resource_path = if is_setting {
            snake_case(name.trim_start_matches(setting_prefix))
        } else {
            resource_path.into()
        };

        let mut base = StructType::new(name.clone(), resource_path.clone());
        for field in seed_fields() {
            base.pin(field);
        }
        let mut types = TypeRegistry::default();
        types.register(base);

        Self {
            name,
            resource_path,
            is_setting,
            types,
            pipeline: FieldPipeline::default(),
        }
    }

    /// The root type, registered under the resource name
    pub fn base_type(&self) -> Option<&StructType> {
        self.types.get(&self.name)
    }

    pub fn base_type_mut(&mut self) -> &mut StructType {
        self.types
            .types
            .entry(self.name.clone())
            .or_insert_with(|| StructType::new(self.name.clone(), self.resource_path.clone()))
    }
}

/// Identity and bookkeeping fields present on every root type
pub fn seed_fields() -> Vec<FieldInfo> {
    vec![
        FieldInfo::new("ID", "_id", types::STRING).omit_empty(true),
        FieldInfo::new("SiteID", "site_id", types::STRING).omit_empty(true),
        FieldInfo::new("Hidden", "attr_hidden", types::BOOL).omit_empty(true),
        FieldInfo::new("HiddenID", "attr_hidden_id", types::STRING).omit_empty(true),
        FieldInfo::new("NoDelete", "attr_no_delete", types::BOOL).omit_empty(true),
        FieldInfo::new("NoEdit", "attr_no_edit", types::BOOL).omit_empty(true),
    ]
}
