//! Field inference engine

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::error::{InferenceError, InferenceResult};
use crate::customize::FieldPipeline;
use crate::models::{EMPTY_STRING_INT, FieldInfo, Resource, StructType, TypeRegistry, types};
use crate::naming::{NameCorrections, field_name};
use crate::validation::{field_validation, numeric_sample};

/// Numeric samples that carry no information beyond the type
const DEGENERATE_SAMPLES: [&str; 2] = ["09", "09.09"];

/// Marker of a dotted-quad address pattern
const DOTTED_QUAD: &str = "\\.){3}";

/// Infers a resource's field tree from a field-definition document
///
/// Values are validation strings, nested objects, or arrays wrapping at
/// most one of those. Every derived field runs through the resource's
/// override pipeline once, after its type has been decided.
#[derive(Debug, Clone)]
pub struct FieldInferrer {
    corrections: NameCorrections,
}

impl Default for FieldInferrer {
    fn default() -> Self {
        Self::new(NameCorrections::field_defaults())
    }
}

impl FieldInferrer {
    pub fn new(corrections: NameCorrections) -> Self {
        Self { corrections }
    }

    pub fn corrections(&self) -> &NameCorrections {
        &self.corrections
    }

    /// Parse `json` and add its fields to the resource's root type
    pub fn infer_json(&self, resource: &mut Resource, json: &str) -> InferenceResult<()> {
        let value: Value = serde_json::from_str(json)?;
        self.infer(resource, &value)
    }

    /// Add the fields of a parsed document to the resource's root type
    pub fn infer(&self, resource: &mut Resource, document: &Value) -> InferenceResult<()> {
        let Value::Object(fields) = document else {
            return Err(InferenceError::InvalidStructure(
                value_type_name(document).to_string(),
            ));
        };

        debug!("Inferring {} field(s) for {}", fields.len(), resource.name);
        let root_name = resource.name.clone();
        let mut walker = Walker {
            corrections: &self.corrections,
            pipeline: &resource.pipeline,
            types: &mut resource.types,
        };

        let mut inferred = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            inferred.push(walker.field(&root_name, key, value)?);
        }

        let base = resource.base_type_mut();
        for field in inferred {
            base.insert(field);
        }
        Ok(())
    }

    /// Infer a single field under `container_type` without touching any
    /// resource, using an empty pipeline. Object values register their
    /// types in `types`.
    pub fn infer_field(
        &self,
        types: &mut TypeRegistry,
        container_type: &str,
        key: &str,
        value: &Value,
    ) -> InferenceResult<FieldInfo> {
        let pipeline = FieldPipeline::default();
        Walker {
            corrections: &self.corrections,
            pipeline: &pipeline,
            types,
        }
        .field(container_type, key, value)
    }
}

/// Recursion state; borrows the pipeline and registry of one resource
struct Walker<'a> {
    corrections: &'a NameCorrections,
    pipeline: &'a FieldPipeline,
    types: &'a mut TypeRegistry,
}

impl Walker<'_> {
    fn field(&mut self, container_type: &str, key: &str, value: &Value) -> InferenceResult<FieldInfo> {
        let name = field_name(key, self.corrections);
        let mut field = self.derive(container_type, key, &name, value)?;
        self.pipeline.process(&name, &mut field);
        Ok(field)
    }

    /// Shape and type decision, before any override
    fn derive(
        &mut self,
        container_type: &str,
        key: &str,
        name: &str,
        value: &Value,
    ) -> InferenceResult<FieldInfo> {
        match value {
            Value::Array(items) => match items.as_slice() {
                [] => Ok(FieldInfo::new(name, key, types::STRING).array()),
                [element] => {
                    let field = self.derive(container_type, key, name, element)?;
                    Ok(field.array().omit_empty(true))
                }
                _ => Err(InferenceError::AmbiguousArray {
                    field: key.to_string(),
                    len: items.len(),
                }),
            },
            Value::Object(members) => self.object(container_type, key, name, members),
            Value::String(raw) => Ok(scalar_field(key, name, raw)),
            other => Err(InferenceError::UnsupportedShape {
                field: key.to_string(),
                shape: value_type_name(other).to_string(),
            }),
        }
    }

    fn object(
        &mut self,
        container_type: &str,
        key: &str,
        name: &str,
        members: &Map<String, Value>,
    ) -> InferenceResult<FieldInfo> {
        let type_name = format!("{container_type}{name}");
        let mut def = StructType::new(type_name.clone(), key);
        for (child_key, child_value) in members {
            def.insert(self.field(&type_name, child_key, child_value)?);
        }
        trace!("registering nested type {type_name}");
        self.types.register(def);
        Ok(FieldInfo::new(name, key, type_name).omit_empty(true))
    }
}

/// Decide the scalar type of a validation string
fn scalar_field(key: &str, name: &str, raw: &str) -> FieldInfo {
    let sample = numeric_sample(raw);

    if sample == "falsetrue" || sample == "truefalse" {
        return FieldInfo::new(name, key, types::BOOL);
    }

    let mut comment = raw;
    if is_numeric(&sample) {
        if DEGENERATE_SAMPLES.contains(&sample.as_str()) {
            comment = "";
        }

        if !sample.contains('.') {
            return FieldInfo::new(name, key, types::INT)
                .omit_empty(true)
                .with_rule(field_validation(comment))
                .with_comment(comment)
                .with_unmarshal_type(EMPTY_STRING_INT);
        }
        if !raw.contains(DOTTED_QUAD) {
            return FieldInfo::new(name, key, types::FLOAT)
                .omit_empty(true)
                .with_comment(comment);
        }
    }

    let omit_empty = !raw.contains("^$") && !name.ends_with("ID");
    FieldInfo::new(name, key, types::STRING)
        .omit_empty(omit_empty)
        .with_rule(field_validation(comment))
        .with_comment(comment)
}

/// Whether a numeric sample parses as a decimal number
fn is_numeric(sample: &str) -> bool {
    sample.chars().any(|c| c.is_ascii_digit())
        && sample
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && sample.parse::<f64>().is_ok()
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
