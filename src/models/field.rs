//! Field model

use serde::{Deserialize, Serialize};

use crate::validation::to_tag;

/// Scalar type names produced by inference
pub mod types {
    pub const STRING: &str = "string";
    pub const INT: &str = "int";
    pub const FLOAT: &str = "float64";
    pub const BOOL: &str = "bool";
    /// Marker type of a resource's root struct
    pub const STRUCT: &str = "struct";
}

/// Decoding hook for integers the controller sends as `""`
pub const EMPTY_STRING_INT: &str = "emptyStringInt";

/// One field or struct member of a generated type
///
/// Struct-typed fields do not embed their members; `field_type` names an
/// entry of the owning resource's [`TypeRegistry`](super::TypeRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Exported identifier
    pub field_name: String,
    /// Original JSON key
    pub json_name: String,
    /// `string`, `int`, `float64`, `bool` or a registered struct name
    pub field_type: String,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub omit_empty: bool,
    /// Composed runtime rule, empty when unconstrained
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validation_rule: String,
    /// The raw pattern the rule was derived from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validation_comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_unmarshal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_unmarshal_func: Option<String>,
}

impl FieldInfo {
    pub fn new(
        field_name: impl Into<String>,
        json_name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            json_name: json_name.into(),
            field_type: field_type.into(),
            ..Default::default()
        }
    }

    pub fn omit_empty(mut self, omit_empty: bool) -> Self {
        self.omit_empty = omit_empty;
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.validation_rule = rule.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.validation_comment = comment.into();
        self
    }

    pub fn with_unmarshal_type(mut self, unmarshal_type: impl Into<String>) -> Self {
        self.custom_unmarshal_type = Some(unmarshal_type.into());
        self
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self.field_type.as_str(),
            types::STRING | types::INT | types::FLOAT | types::BOOL
        )
    }

    /// Struct tag form of the validation rule
    pub fn validation_tag(&self) -> String {
        to_tag(&self.validation_rule)
    }
}
