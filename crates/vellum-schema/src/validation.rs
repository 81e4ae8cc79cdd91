//! Document validation against a schema.
//!
//! [`validate`] walks every declared field and collects all violations
//! instead of stopping at the first one, so a caller sees the full list
//! in one round trip. Nested fields are reported by dotted path
//! (`contactInfo.email`, `landmarks.0.name`).
//!
//! Uniqueness is not checked here. It depends on the other records in a
//! collection and is enforced by the store at write time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_core::{Document, Error, FieldViolation, Result, Rule};

use crate::collection::CollectionSchema;
use crate::field::{FieldDescriptor, FieldType};

// ============================================================================
// Types
// ============================================================================

/// Result of validating one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every violation found, in field declaration order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    /// Create an empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no violations were found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Record a violation.
    pub fn add(&mut self, field: impl Into<String>, rule: Rule) {
        self.violations.push(FieldViolation::new(field, rule));
    }

    /// Violations for one field path.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.field == field)
            .map(|v| &v.rule)
    }

    /// Convert into `Ok(())` or an [`Error::Validation`] for `collection`.
    pub fn into_result(self, collection: &str) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::validation(collection, self.violations))
        }
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a document against a schema.
///
/// Checks, per field:
/// - required fields are present (null and `""` count as missing)
/// - values have the declared JSON type
/// - text respects max/exact length, counted in characters
/// - select values are declared options
/// - email fields look like an address
/// - groups and array items, recursively
pub fn validate(schema: &CollectionSchema, doc: &Document) -> ValidationReport {
    let mut report = ValidationReport::new();
    validate_fields(&schema.fields, doc, "", &mut report);
    report
}

fn validate_fields(
    fields: &[FieldDescriptor],
    doc: &Document,
    prefix: &str,
    report: &mut ValidationReport,
) {
    for field in fields {
        let path = format!("{prefix}{}", field.name);
        match doc.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    report.add(path, Rule::Required);
                }
            }
            Some(Value::String(s)) if s.is_empty() => {
                if field.required {
                    report.add(path, Rule::Required);
                }
            }
            Some(value) => validate_value(field, value, &path, report),
        }
    }
}

fn validate_value(
    field: &FieldDescriptor,
    value: &Value,
    path: &str,
    report: &mut ValidationReport,
) {
    match &field.field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Email => {
            let Some(text) = value.as_str() else {
                report.add(path, invalid_type("text"));
                return;
            };
            check_length(field, text, path, report);
            if field.field_type == FieldType::Email && !looks_like_email(text) {
                report.add(path, Rule::InvalidEmail);
            }
        }
        FieldType::Select { options } => match value.as_str() {
            Some(choice) if options.contains(&choice) => {}
            _ => report.add(
                path,
                Rule::InvalidOption {
                    allowed: options.iter().map(|o| (*o).to_string()).collect(),
                },
            ),
        },
        FieldType::Number => {
            if !value.is_number() {
                report.add(path, invalid_type("number"));
            }
        }
        FieldType::Checkbox => {
            if !value.is_boolean() {
                report.add(path, invalid_type("boolean"));
            }
        }
        FieldType::RichText => {
            if !(value.is_object() || value.is_array()) {
                report.add(path, invalid_type("rich text document"));
            }
        }
        FieldType::Upload { relation_to } | FieldType::Relationship { relation_to } => {
            if !(value.is_string() || value.is_object()) {
                report.add(path, invalid_type(&format!("reference to {relation_to}")));
            }
        }
        FieldType::Group { fields } => match value.as_object() {
            Some(group) => validate_fields(fields, group, &format!("{path}."), report),
            None => report.add(path, invalid_type("object")),
        },
        FieldType::Array { fields } => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    match item.as_object() {
                        Some(obj) => validate_fields(fields, obj, &format!("{path}.{i}."), report),
                        None => report.add(format!("{path}.{i}"), invalid_type("object")),
                    }
                }
            }
            None => report.add(path, invalid_type("list")),
        },
    }
}

fn invalid_type(expected: &str) -> Rule {
    Rule::InvalidType {
        expected: expected.to_string(),
    }
}

fn check_length(field: &FieldDescriptor, text: &str, path: &str, report: &mut ValidationReport) {
    let actual = text.chars().count();
    if let Some(expected) = field.exact_length {
        if actual != expected {
            report.add(path, Rule::ExactLength { expected, actual });
        }
    }
    if let Some(max) = field.max_length {
        if actual > max {
            report.add(path, Rule::MaxLength { max, actual });
        }
    }
}

/// Loose shape check: `local@domain.tld`, no whitespace.
fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
