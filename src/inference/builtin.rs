//! Resource-specific behaviour shipped with the generator
//!
//! Seeds extra fields onto a handful of root types and installs override
//! rules that document customizations are placed ahead of.

use serde::{Deserialize, Serialize};

use crate::customize::OverrideRule;
use crate::models::{EMPTY_STRING_INT, FieldInfo, Resource, StructType, types};
use crate::validation::Shape;

const NON_GENERATED: &str = "non-generated field";

/// A hard-coded field override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BuiltInRule {
    /// Replace a leading `prefix` of the field name with `replacement`
    RenamePrefix { prefix: String, replacement: String },
    /// Set the type of the field named `field`
    RetypeField { field: String, field_type: String },
    /// Fields whose name ends in `suffix` become integers decoded from
    /// possibly-empty strings, except those listed in `except`
    IntBySuffix { suffix: String, except: Vec<String> },
}

impl BuiltInRule {
    pub fn apply(&self, name: &str, field: &mut FieldInfo) {
        match self {
            BuiltInRule::RenamePrefix {
                prefix,
                replacement,
            } => {
                if name.starts_with(prefix.as_str()) {
                    field.field_name = field.field_name.replacen(prefix.as_str(), replacement, 1);
                }
            }
            BuiltInRule::RetypeField { field: target, field_type } => {
                if name == target {
                    field.field_type = field_type.clone();
                }
            }
            BuiltInRule::IntBySuffix { suffix, except } => {
                if name.ends_with(suffix.as_str()) && !except.iter().any(|e| e == name) {
                    field.field_type = types::INT.to_string();
                    field.custom_unmarshal_type = Some(EMPTY_STRING_INT.to_string());
                }
            }
        }
    }
}

/// Seed built-in fields and install built-in rules on a fresh resource
pub fn install_builtins(resource: &mut Resource) {
    seed_base_type(resource);

    match resource.name.as_str() {
        "SettingGlobalAp" => {
            resource.pipeline.push(OverrideRule::BuiltIn(BuiltInRule::RenamePrefix {
                prefix: "6E".to_string(),
                replacement: "SixE".to_string(),
            }));
        }
        "SettingMgmt" => {
            let ssh_keys = ssh_key_type(&resource.name);
            let type_name = ssh_keys.name.clone();
            resource.types.register(ssh_keys);
            resource.pipeline.push(OverrideRule::BuiltIn(BuiltInRule::RetypeField {
                field: "XSshKeys".to_string(),
                field_type: type_name,
            }));
        }
        "SettingUsg" => {
            resource.pipeline.push(OverrideRule::BuiltIn(BuiltInRule::IntBySuffix {
                suffix: "Timeout".to_string(),
                except: vec!["ArpCacheTimeout".to_string()],
            }));
        }
        _ => {}
    }
}

fn seed_base_type(resource: &mut Resource) {
    let is_setting = resource.is_setting;
    let name = resource.name.clone();
    let base = resource.base_type_mut();

    if is_setting {
        base.pin(FieldInfo::new("Key", "key", types::STRING));
        if name == "SettingUsg" {
            // dropped by newer controllers
            base.insert(FieldInfo::new("MdnsEnabled", "mdns_enabled", types::BOOL));
        }
        return;
    }

    match name.as_str() {
        "Device" => {
            base.pin(
                FieldInfo::new("MAC", "mac", types::STRING)
                    .omit_empty(true)
                    .with_rule(Shape::Mac.rule()),
            );
            base.insert(FieldInfo::new("Adopted", "adopted", types::BOOL));
            base.insert(FieldInfo::new("Model", "model", types::STRING).omit_empty(true));
            base.insert(FieldInfo::new("State", "state", "DeviceState"));
            base.insert(FieldInfo::new("Type", "type", types::STRING).omit_empty(true));
        }
        "User" => {
            base.pin(
                FieldInfo::new("IP", "ip", types::STRING)
                    .omit_empty(true)
                    .with_rule(Shape::Ip.rule())
                    .with_comment(NON_GENERATED),
            );
            base.pin(
                FieldInfo::new("DevIdOverride", "dev_id_override", types::INT)
                    .omit_empty(true)
                    .with_comment(NON_GENERATED),
            );
        }
        "WLAN" => {
            // dropped by newer controllers
            base.insert(FieldInfo::new("WLANGroupID", "wlangroup_id", types::STRING));
        }
        _ => {}
    }
}

fn ssh_key_type(resource_name: &str) -> StructType {
    let mut def = StructType::new(format!("{resource_name}XSshKeys"), "x_ssh_keys");
    for (field_name, json_name) in [
        ("Name", "name"),
        ("KeyType", "type"),
        ("Key", "key"),
        ("Comment", "comment"),
        ("Date", "date"),
        ("Fingerprint", "fingerprint"),
    ] {
        def.insert(FieldInfo::new(field_name, json_name, types::STRING));
    }
    def
}
