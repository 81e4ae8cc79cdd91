//! Field-level validation failures.
//!
//! A [`FieldViolation`] names the offending field (dotted path for nested
//! groups and array items, e.g. `contactInfo.email` or `landmarks.0.name`)
//! and the [`Rule`] it broke. They travel inside
//! [`Error::Validation`](crate::Error::Validation).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A constraint declared by a schema field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Field is required but missing, null or empty.
    Required,
    /// Another record already holds this value.
    Unique,
    /// Text is longer than allowed.
    MaxLength { max: usize, actual: usize },
    /// Text must have exactly this many characters.
    ExactLength { expected: usize, actual: usize },
    /// Select value is not one of the declared options.
    InvalidOption { allowed: Vec<String> },
    /// Value has the wrong JSON type.
    InvalidType { expected: String },
    /// Value is not a plausible email address.
    InvalidEmail,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "is required"),
            Rule::Unique => write!(f, "must be unique"),
            Rule::MaxLength { max, actual } => {
                write!(f, "must be at most {max} characters (got {actual})")
            }
            Rule::ExactLength { expected, actual } => {
                write!(f, "must be exactly {expected} characters (got {actual})")
            }
            Rule::InvalidOption { allowed } => {
                write!(f, "must be one of [{}]", allowed.join(", "))
            }
            Rule::InvalidType { expected } => write!(f, "must be {expected}"),
            Rule::InvalidEmail => write!(f, "must be a valid email address"),
        }
    }
}

/// A single field that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field path within the document.
    pub field: String,
    /// The rule the field broke.
    #[serde(flatten)]
    pub rule: Rule,
}

impl FieldViolation {
    /// Create a new violation.
    pub fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = FieldViolation::new("metaTitle", Rule::MaxLength { max: 70, actual: 81 });
        assert_eq!(
            v.to_string(),
            "metaTitle must be at most 70 characters (got 81)"
        );
    }

    #[test]
    fn test_violation_serializes_rule_inline() {
        let v = FieldViolation::new("slug", Rule::Unique);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["field"], "slug");
        assert_eq!(json["rule"], "unique");
    }

    #[test]
    fn test_invalid_option_lists_choices() {
        let rule = Rule::InvalidOption {
            allowed: vec!["draft".into(), "published".into()],
        };
        assert_eq!(rule.to_string(), "must be one of [draft, published]");
    }
}
