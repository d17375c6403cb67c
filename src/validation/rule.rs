//! Runtime validation rule composition
//!
//! A rule is a comma separated list of validator tokens in the
//! `go-playground/validator` dialect, always led by `omitempty` because
//! nearly every controller field accepts the empty string.

use serde::{Deserialize, Serialize};

/// Name of the struct tag the rule is rendered into
pub const VALIDATE_TAG: &str = "validate";

/// Named validator tokens understood by the generated client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    OmitEmpty,
    OneOf,
    Len,
    Gte,
    Lte,
    WRegex,
    Mac,
    Ipv4,
    Ipv6,
    Ip,
    NumericNonzero,
}

impl Validator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Validator::OmitEmpty => "omitempty",
            Validator::OneOf => "oneof",
            Validator::Len => "len",
            Validator::Gte => "gte",
            Validator::Lte => "lte",
            Validator::WRegex => "w_regex",
            Validator::Mac => "mac",
            Validator::Ipv4 => "ipv4",
            Validator::Ipv6 => "ipv6",
            Validator::Ip => "ip",
            Validator::NumericNonzero => "numeric_nonzero",
        }
    }
}

impl std::fmt::Display for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validator together with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub validator: Validator,
    pub params: Vec<String>,
}

impl Validation {
    /// A validator without parameters
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(validator: Validator, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            validator,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Render as `name` or `name=p1 p2`; empty parameters are dropped
    pub fn render(&self) -> String {
        let params: Vec<&str> = self
            .params
            .iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        if params.is_empty() {
            self.validator.to_string()
        } else {
            format!("{}={}", self.validator, params.join(" "))
        }
    }
}

/// Compose the rule for `validations`, prefixed with the implicit
/// `omitempty` token. No validations yields an empty rule.
pub fn compose(validations: &[Validation]) -> String {
    if validations.is_empty() {
        return String::new();
    }
    std::iter::once(Validator::OmitEmpty.to_string())
        .chain(validations.iter().map(Validation::render))
        .collect::<Vec<_>>()
        .join(",")
}

/// Wrap a composed rule into its struct tag, `validate:"..."`
pub fn to_tag(rule: &str) -> String {
    if rule.is_empty() {
        return String::new();
    }
    format!("{VALIDATE_TAG}:\"{rule}\"")
}
