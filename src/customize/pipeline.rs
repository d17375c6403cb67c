//! Ordered field override rules

use std::collections::BTreeMap;

use super::document::{FieldCustomization, ResourceCustomization};
use crate::inference::builtin::BuiltInRule;
use crate::models::FieldInfo;

/// One step of a resource's field pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideRule {
    /// Document `_all` entry, applied to every field
    AllFields(FieldCustomization),
    /// Document entries keyed by derived field name
    Fields(BTreeMap<String, FieldCustomization>),
    /// Resource-specific behaviour shipped with the generator
    BuiltIn(BuiltInRule),
}

impl OverrideRule {
    pub fn apply(&self, name: &str, field: &mut FieldInfo) {
        match self {
            OverrideRule::AllFields(customization) => {
                customization.apply(field);
            }
            OverrideRule::Fields(by_name) => {
                if let Some(customization) = by_name.get(name) {
                    customization.apply(field);
                }
            }
            OverrideRule::BuiltIn(rule) => rule.apply(name, field),
        }
    }

    pub fn is_built_in(&self) -> bool {
        matches!(self, OverrideRule::BuiltIn(_))
    }

    /// Rules contributed by one document entry: `_all` first, then the
    /// field-specific entries
    pub fn from_resource(customization: &ResourceCustomization) -> Vec<OverrideRule> {
        let mut rules = Vec::new();
        if let Some(all) = customization.all_fields() {
            rules.push(OverrideRule::AllFields(all.clone()));
        }
        let fields = customization.field_entries();
        if !fields.is_empty() {
            rules.push(OverrideRule::Fields(fields));
        }
        rules
    }
}

/// The composed override pipeline of one resource
///
/// Document rules always sit ahead of built-in rules so built-ins observe
/// customized attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPipeline {
    rules: Vec<OverrideRule>,
}

impl FieldPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every rule in order against `field`, keyed by its derived name
    pub fn process(&self, name: &str, field: &mut FieldInfo) {
        for rule in &self.rules {
            rule.apply(name, field);
        }
    }

    /// Append a rule at the end
    pub fn push(&mut self, rule: OverrideRule) {
        self.rules.push(rule);
    }

    /// Insert rules after any existing document rules and ahead of the
    /// first built-in rule
    pub fn insert_before_builtins(&mut self, rules: Vec<OverrideRule>) {
        let at = self
            .rules
            .iter()
            .position(OverrideRule::is_built_in)
            .unwrap_or(self.rules.len());
        self.rules.splice(at..at, rules);
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    pub fn has_built_ins(&self) -> bool {
        self.rules.iter().any(OverrideRule::is_built_in)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
