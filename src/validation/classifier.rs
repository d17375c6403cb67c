//! Classification of controller validation patterns
//!
//! The controller describes legal field values with regex-like strings.
//! Only a closed vocabulary of those patterns is recognized here; anything
//! else classifies as [`Shape::Unconstrained`] and never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::rule::{Validation, Validator, compose};

/// Characters with special meaning in the controller's patterns
const REGEX_CHARS: &str = "^$*+?()[]{}\\|.";

pub const MAC_PATTERN: &str = "([0-9A-Fa-f]{2}:){5}([0-9A-Fa-f]{2})";

pub const IPV4_PATTERN: &str = "(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])";

pub const IPV6_PATTERN: &str = "(([0-9a-fA-F]{1,4}:){7,7}[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,7}:|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}|([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}|([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}|([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}|[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})|:((:[0-9a-fA-F]{1,4}){1,7}|:)|fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]{1,}|::(ffff(:0{1,4}){0,1}:){0,1}((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])|([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9]))";

/// One non-zero digit followed by any digits, anchors already removed
pub const NUMERIC_NONZERO_PATTERN: &str = "[1-9][0-9]*";

/// Free-form identifier patterns
pub const WORD_PATTERNS: [&str; 4] = ["[\\d\\w]+", "[\\d\\w]*", "[\\w]+", "[\\w]*"];

/// Characters allowed to surround the canonical MAC/IP sub-patterns
const STRUCTURAL_CHARS: &str = "^$()|";

static IPV4_PIPES: Lazy<usize> = Lazy::new(|| IPV4_PATTERN.matches('|').count());
static IPV6_PIPES: Lazy<usize> = Lazy::new(|| IPV6_PATTERN.matches('|').count());

static QUANTIFIERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\d*,?\d*\}|\*|\+|\?").expect("valid quantifier regex"));

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\(\[\]\)\|\-\$\^]").expect("valid control regex"));

/// Recognized pattern shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Shape {
    /// Enumerated literal set
    OneOf { values: Vec<String> },
    /// Exact length
    Length { len: u64 },
    /// Inclusive length range
    LengthRange { min: u64, max: u64 },
    /// Word characters, optionally with digits
    WordPattern,
    Mac,
    Ipv4,
    Ipv6,
    /// IPv4 or IPv6
    Ip,
    /// Positive integer without a leading zero
    NumericNonZero,
    /// Not recognized, no constraint
    Unconstrained,
}

impl Shape {
    /// Validators implied by this shape
    pub fn validations(&self) -> Vec<Validation> {
        match self {
            Shape::OneOf { values } => {
                vec![Validation::with_params(Validator::OneOf, values.iter().cloned())]
            }
            Shape::Length { len } => vec![Validation::with_params(Validator::Len, [len.to_string()])],
            Shape::LengthRange { min, max } => vec![
                Validation::with_params(Validator::Gte, [min.to_string()]),
                Validation::with_params(Validator::Lte, [max.to_string()]),
            ],
            Shape::WordPattern => vec![Validation::new(Validator::WRegex)],
            Shape::Mac => vec![Validation::new(Validator::Mac)],
            Shape::Ipv4 => vec![Validation::new(Validator::Ipv4)],
            Shape::Ipv6 => vec![Validation::new(Validator::Ipv6)],
            Shape::Ip => vec![Validation::new(Validator::Ip)],
            Shape::NumericNonZero => vec![Validation::new(Validator::NumericNonzero)],
            Shape::Unconstrained => Vec::new(),
        }
    }

    /// Composed runtime rule, empty for [`Shape::Unconstrained`]
    pub fn rule(&self) -> String {
        compose(&self.validations())
    }

    pub fn is_constrained(&self) -> bool {
        !matches!(self, Shape::Unconstrained)
    }
}

/// Remove the optional-empty alternation, `(^$|…|^$)` or `^$|…|^$`
pub fn trim_wrappers(raw: &str) -> &str {
    let s = raw.strip_prefix("(^$|").unwrap_or(raw);
    let s = s.strip_suffix("|^$)").unwrap_or(s);
    let s = s.strip_prefix("^$|").unwrap_or(s);
    s.strip_suffix("|^$").unwrap_or(s)
}

/// Remove a leading `^` and trailing `$`, only as a matched pair
fn strip_anchors(s: &str) -> &str {
    match s.strip_prefix('^').and_then(|rest| rest.strip_suffix('$')) {
        Some(inner) => inner,
        None => s,
    }
}

/// The pattern the shape rules look at
fn unwrap_pattern(raw: &str) -> &str {
    strip_anchors(trim_wrappers(raw))
}

fn has_regex_chars(s: &str, allowed: &str) -> bool {
    s.chars()
        .any(|c| REGEX_CHARS.contains(c) && !allowed.contains(c))
}

/// Reduce a pattern to a literal sample for numeric sniffing.
///
/// `\d+` becomes `09`, `[-+]?[0-9]*\.?[0-9]+` becomes `09.09`. The result
/// is only meant to be fed to a float parser.
pub fn numeric_sample(pattern: &str) -> String {
    let s = pattern
        .replace("\\d", "[0-9]")
        .replace("[-+]?", "")
        .replace("[+-]?", "")
        .replace("[-]?", "")
        .replace("\\.", ".")
        .replace("[.]?", ".");
    let s = QUANTIFIERS.replace_all(&s, "");
    let s = CONTROL_CHARS.replace_all(&s, "");
    let s = s.strip_prefix('^').unwrap_or(&s);
    let s = s.strip_suffix('$').unwrap_or(s);
    if !pattern.is_empty() && !s.is_empty() {
        trace!("normalize {pattern:?} to {s:?}");
    }
    s.to_string()
}

pub fn is_one_of(pattern: &str) -> bool {
    pattern.contains('|') && !has_regex_chars(pattern, "|.")
}

/// Bounds of a `.{m}` / `.{m,n}` pattern
pub fn defined_length(pattern: &str) -> Option<(u64, Option<u64>)> {
    let inner = pattern.strip_prefix(".{")?.strip_suffix('}')?;
    if has_regex_chars(pattern, ".{}") {
        return None;
    }
    let mut bounds = inner.split(',');
    let min = parse_bound(bounds.next()?)?;
    let max = match bounds.next() {
        Some(b) => Some(parse_bound(b)?),
        None => None,
    };
    if bounds.next().is_some() {
        return None;
    }
    Some((min, max))
}

fn parse_bound(s: &str) -> Option<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn is_word_pattern(pattern: &str) -> bool {
    WORD_PATTERNS.contains(&pattern)
}

/// True when only structural characters remain once the canonical
/// sub-patterns are cut out
fn only_structure_around(pattern: &str, canonical: &[&str]) -> bool {
    let mut residue = pattern.to_string();
    for c in canonical {
        if !residue.contains(c) {
            return false;
        }
        residue = residue.replacen(c, "", 1);
    }
    residue.chars().all(|c| STRUCTURAL_CHARS.contains(c))
}

pub fn is_mac(pattern: &str) -> bool {
    !pattern.contains('|') && only_structure_around(pattern, &[MAC_PATTERN])
}

fn pipes(pattern: &str) -> usize {
    pattern.matches('|').count()
}

pub fn is_ipv4(pattern: &str) -> bool {
    pipes(pattern) == *IPV4_PIPES && only_structure_around(pattern, &[IPV4_PATTERN])
}

pub fn is_ipv6(pattern: &str) -> bool {
    pipes(pattern) == *IPV6_PIPES && only_structure_around(pattern, &[IPV6_PATTERN])
}

pub fn is_ip(pattern: &str) -> bool {
    pipes(pattern) == *IPV4_PIPES + *IPV6_PIPES + 1
        && only_structure_around(pattern, &[IPV6_PATTERN, IPV4_PATTERN])
}

pub fn is_numeric_nonzero(pattern: &str) -> bool {
    pattern == NUMERIC_NONZERO_PATTERN
}

/// Classify a raw validation string. First matching shape wins.
pub fn classify(raw: &str) -> Shape {
    if raw.is_empty() {
        return Shape::Unconstrained;
    }
    let pattern = unwrap_pattern(raw);

    if is_one_of(pattern) {
        return Shape::OneOf {
            values: pattern.split('|').map(str::to_string).collect(),
        };
    }
    if let Some((min, max)) = defined_length(pattern) {
        return match max {
            Some(max) => Shape::LengthRange { min, max },
            None => Shape::Length { len: min },
        };
    }
    if is_word_pattern(pattern) {
        return Shape::WordPattern;
    }
    if is_mac(pattern) {
        return Shape::Mac;
    }
    if is_ipv4(pattern) {
        return Shape::Ipv4;
    }
    if is_ipv6(pattern) {
        return Shape::Ipv6;
    }
    if is_ip(pattern) {
        return Shape::Ip;
    }
    if is_numeric_nonzero(pattern) {
        return Shape::NumericNonZero;
    }
    Shape::Unconstrained
}

/// Classify and compose in one step
pub fn field_validation(raw: &str) -> String {
    classify(raw).rule()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrappings(p: &str) -> Vec<String> {
        vec![
            p.to_string(),
            format!("(^$|{p}|^$)"),
            format!("^$|{p}"),
            format!("{p}|^$"),
        ]
    }

    #[test]
    fn test_field_validation() {
        let cases = [
            ("a|b", "omitempty,oneof=a b"),
            ("1|2", "omitempty,oneof=1 2"),
            (".{1,2}", "omitempty,gte=1,lte=2"),
            (".{1}", "omitempty,len=1"),
            ("[\\d\\w]+", "omitempty,w_regex"),
            ("[\\d\\w]*", "omitempty,w_regex"),
            ("[\\w]+", "omitempty,w_regex"),
            ("[\\w]*", "omitempty,w_regex"),
            ("a", ""),
            (".{1}|.{5,6}", ""),
            ("a|.{5,6}", ""),
            ("", ""),
        ];
        for (pattern, expected) in cases {
            assert_eq!(field_validation(pattern), expected, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_is_one_of() {
        let cases = [
            ("", false),
            ("a", false),
            ("a|b", true),
            ("1-2|2-3", true),
            ("1_2|2_3", true),
            ("1|2", true),
            ("%|#", true),
            ("vpn|802.1x|custom", true),
            ("^a|b", false),
            ("a|b$", false),
            ("(a)|b", false),
            ("[a]|b", false),
            ("a+|b", false),
            ("a*|b", false),
            ("[a]*|b", false),
            ("a?|b", false),
            ("\\w|b", false),
            ("{a}|b", false),
            (".{0,32}", false),
        ];
        for (pattern, expected) in cases {
            assert_eq!(is_one_of(pattern), expected, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_classify_one_of() {
        assert_eq!(
            classify("a|b"),
            Shape::OneOf {
                values: vec!["a".into(), "b".into()]
            }
        );
        assert_eq!(
            classify("^$|default|custom"),
            Shape::OneOf {
                values: vec!["default".into(), "custom".into()]
            }
        );
        for p in ["(a)|b", "[a]|b", "a*|b", "a?|b", "\\w|b", "{a}|b"] {
            assert!(!matches!(classify(p), Shape::OneOf { .. }), "pattern {p:?}");
        }
    }

    #[test]
    fn test_defined_length() {
        let accepted = [
            (".{1,2}", (1, Some(2))),
            (".{0,9999}", (0, Some(9999))),
            (".{9999}", (9999, None)),
        ];
        for (pattern, expected) in accepted {
            assert_eq!(defined_length(pattern), Some(expected), "pattern {pattern:?}");
        }

        let rejected = [
            "", "{9999}", "{9999", "9999}", ".{}", ".{1,2,3}", "a", "a,b", "1,2", "1",
            ".{1,b}", ".{a,2}", ".{a,b}", ".{1-2}", ".{1_2,2_3}", ".{%,#}", ".{^1,2}",
            ".{1,2$", ".{(1),2}", ".{[1],2}", ".{1+,2}", ".{1*,2}", ".{[1]*,2}", ".{1?,2}",
            ".{\\w,2}", ".{{1},2}", ".{.,2}", ".{-1,2}",
        ];
        for pattern in rejected {
            assert_eq!(defined_length(pattern), None, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_classify_length() {
        assert_eq!(classify(".{1,2}"), Shape::LengthRange { min: 1, max: 2 });
        assert_eq!(classify(".{5}"), Shape::Length { len: 5 });
        assert_eq!(classify(".{1,2,3}"), Shape::Unconstrained);
        assert_eq!(classify("^.{0,32}$"), Shape::LengthRange { min: 0, max: 32 });
    }

    #[test]
    fn test_word_pattern() {
        for p in ["[\\d\\w]+", "[\\d\\w]*", "[\\w]+", "[\\w]*"] {
            assert!(is_word_pattern(p));
        }
        for p in ["", "a", "[\\d]+", "[\\d]*", "[\\s]+", "[\\s]*"] {
            assert!(!is_word_pattern(p));
        }
    }

    #[test]
    fn test_mac() {
        let canonical = format!("^{MAC_PATTERN}$");
        for p in wrappings(&canonical).iter().chain(wrappings(MAC_PATTERN).iter()) {
            assert_eq!(classify(p), Shape::Mac, "pattern {p:?}");
        }
        assert_eq!(classify(&format!("abc{MAC_PATTERN}")), Shape::Unconstrained);
        assert_eq!(classify(&format!("^{MAC_PATTERN}x$")), Shape::Unconstrained);
        assert_eq!(classify(&format!("{MAC_PATTERN}|foo")), Shape::Unconstrained);
    }

    #[test]
    fn test_ip_shapes() {
        let v4 = format!("^{IPV4_PATTERN}$");
        for p in wrappings(&v4) {
            assert_eq!(classify(&p), Shape::Ipv4, "pattern {p:?}");
        }

        let v6 = format!("^{IPV6_PATTERN}$");
        for p in wrappings(&v6) {
            assert_eq!(classify(&p), Shape::Ipv6, "pattern {p:?}");
        }

        let both = format!("^{IPV4_PATTERN}$|^{IPV6_PATTERN}$");
        for p in wrappings(&both) {
            assert_eq!(classify(&p), Shape::Ip, "pattern {p:?}");
        }

        // literal text around the canonical pattern
        assert_eq!(classify(&format!("^x{IPV4_PATTERN}$")), Shape::Unconstrained);
        assert_eq!(classify(&format!("^{IPV6_PATTERN}/64$")), Shape::Unconstrained);
        // extra alternation group
        assert_eq!(
            classify(&format!("^{IPV4_PATTERN}$|^localhost$")),
            Shape::Unconstrained
        );
        assert_eq!(
            classify(&format!("^{IPV4_PATTERN}(/[0-9]+)?$")),
            Shape::Unconstrained
        );
    }

    #[test]
    fn test_numeric_nonzero() {
        for p in wrappings("^[1-9][0-9]*$") {
            assert_eq!(classify(&p), Shape::NumericNonZero, "pattern {p:?}");
        }
        assert_eq!(classify("^[0-9][0-9]*$"), Shape::Unconstrained);
    }

    #[test]
    fn test_wrapping_does_not_change_shape() {
        let patterns = ["a|b", ".{1,2}", ".{5}", "[\\w]+", "^[1-9][0-9]*$", "plain"];
        for p in patterns {
            let shape = classify(p);
            for wrapped in wrappings(p) {
                assert_eq!(classify(&wrapped), shape, "pattern {wrapped:?}");
            }
        }
    }

    #[test]
    fn test_trim_wrappers() {
        assert_eq!(trim_wrappers("(^$|a|^$)"), "a");
        assert_eq!(trim_wrappers("^$|a"), "a");
        assert_eq!(trim_wrappers("a|^$"), "a");
        assert_eq!(trim_wrappers("^$"), "^$");
        assert_eq!(trim_wrappers("a|b"), "a|b");
    }

    #[test]
    fn test_numeric_sample() {
        let cases = [
            ("\\d+", "09"),
            ("[-+]?[0-9]*\\.?[0-9]+", "09.09"),
            ("^([0-9]|[1-9][0-9]|25[0-5])$", "0919092505"),
            ("^(([0-9]\\.[0-9]{2})\\.){3}([0-9]\\.[0-9])$", "09.09.09.09"),
            ("[+-]?[0-9]*\\.?[0-9]+", "09.09"),
            ("[-]?[\\d]+[.]?[\\d]*", "09.09"),
            ("^$|^(20[0-9]{2}T([01][0-9]):[1-5]:[0-9])Z?$", "2009T0109:15:09Z"),
            ("false|true", "falsetrue"),
            ("true|false", "truefalse"),
            (".{0,32}", "."),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(numeric_sample(input), expected, "pattern {input:?}");
        }
    }
}
