//! Field descriptors.
//!
//! A [`FieldDescriptor`] is pure declaration: name, semantic type,
//! constraints and default. Enforcement lives in
//! [`validate`](crate::validation::validate).
//!
//! # Example
//!
//! ```
//! use vellum_schema::FieldDescriptor;
//!
//! let title = FieldDescriptor::text("title").required();
//! let excerpt = FieldDescriptor::textarea("excerpt").max_length(300);
//! assert!(title.required);
//! assert_eq!(excerpt.max_length, Some(300));
//! ```

use serde_json::Value;

/// Semantic type of a field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line plain text.
    Textarea,
    /// Email address.
    Email,
    /// Structured rich-text document, stored opaquely.
    RichText,
    /// One of a fixed set of string options.
    Select { options: Vec<&'static str> },
    /// Numeric value.
    Number,
    /// Boolean flag.
    Checkbox,
    /// Reference to an uploaded asset in another collection.
    Upload { relation_to: &'static str },
    /// Reference to a record in another collection.
    Relationship { relation_to: &'static str },
    /// Ordered list of sub-records.
    Array { fields: Vec<FieldDescriptor> },
    /// Named group of nested fields.
    Group { fields: Vec<FieldDescriptor> },
}

impl FieldType {
    /// Whether values are plain strings subject to length limits.
    pub fn is_text(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea | FieldType::Email)
    }

    /// Nested field descriptors for arrays and groups.
    pub fn children(&self) -> Option<&[FieldDescriptor]> {
        match self {
            FieldType::Array { fields } | FieldType::Group { fields } => Some(fields),
            _ => None,
        }
    }
}

/// Declaration of one field in a schema.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub unique: bool,
    pub max_length: Option<usize>,
    pub exact_length: Option<usize>,
    pub default: Option<Value>,
}

impl FieldDescriptor {
    /// Create an optional, unconstrained field.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            unique: false,
            max_length: None,
            exact_length: None,
            default: None,
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn textarea(name: &'static str) -> Self {
        Self::new(name, FieldType::Textarea)
    }

    pub fn email(name: &'static str) -> Self {
        Self::new(name, FieldType::Email)
    }

    pub fn rich_text(name: &'static str) -> Self {
        Self::new(name, FieldType::RichText)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn checkbox(name: &'static str) -> Self {
        Self::new(name, FieldType::Checkbox)
    }

    pub fn select(name: &'static str, options: &[&'static str]) -> Self {
        Self::new(
            name,
            FieldType::Select {
                options: options.to_vec(),
            },
        )
    }

    pub fn upload(name: &'static str, relation_to: &'static str) -> Self {
        Self::new(name, FieldType::Upload { relation_to })
    }

    pub fn relationship(name: &'static str, relation_to: &'static str) -> Self {
        Self::new(name, FieldType::Relationship { relation_to })
    }

    pub fn array(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, FieldType::Array { fields })
    }

    pub fn group(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, FieldType::Group { fields })
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as unique within its collection.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Limit text to `max` characters.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require text of exactly `len` characters.
    pub fn exact_length(mut self, len: usize) -> Self {
        self.exact_length = Some(len);
        self
    }

    /// Value filled in when the field is absent.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_optional() {
        let f = FieldDescriptor::text("title");
        assert!(!f.required);
        assert!(!f.unique);
        assert!(f.max_length.is_none());
        assert!(f.default.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let f = FieldDescriptor::text("slug").required().unique();
        assert!(f.required && f.unique);

        let f = FieldDescriptor::checkbox("showInNav").default_value(false);
        assert_eq!(f.default, Some(Value::Bool(false)));
    }

    #[test]
    fn test_select_options() {
        let f = FieldDescriptor::select("status", &["draft", "published"]);
        match f.field_type {
            FieldType::Select { options } => assert_eq!(options, vec!["draft", "published"]),
            other => panic!("unexpected field type {other:?}"),
        }
    }

    #[test]
    fn test_children() {
        let group = FieldDescriptor::group("contactInfo", vec![FieldDescriptor::text("phone")]);
        assert_eq!(group.field_type.children().map(<[_]>::len), Some(1));
        assert!(FieldType::Number.children().is_none());
    }

    #[test]
    fn test_is_text() {
        assert!(FieldType::Email.is_text());
        assert!(FieldType::Textarea.is_text());
        assert!(!FieldType::RichText.is_text());
    }
}
