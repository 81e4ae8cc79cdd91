//! Schema-driven document shaping.
//!
//! [`apply_defaults`] fills declared defaults into absent fields and
//! [`sanitize`] drops keys the schema does not declare. Both recurse into
//! groups and array items and never fail.

use serde_json::Value;

use vellum_core::Document;

use crate::collection::ID_FIELD;
use crate::field::{FieldDescriptor, FieldType};

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn has_defaults(fields: &[FieldDescriptor]) -> bool {
    fields.iter().any(|f| {
        f.default.is_some()
            || matches!(&f.field_type, FieldType::Group { fields } if has_defaults(fields))
    })
}

/// Fill absent fields with their declared defaults.
///
/// A missing group is created when any of its fields has a default, so
/// nested defaults such as `defaultSeo.titleTemplate` appear on a fresh
/// document.
pub fn apply_defaults(fields: &[FieldDescriptor], doc: &mut Document) {
    for field in fields {
        match &field.field_type {
            FieldType::Group { fields: children } => {
                if is_absent(doc.get(field.name)) && has_defaults(children) {
                    doc.insert(field.name.to_string(), Value::Object(Document::new()));
                }
                if let Some(Value::Object(group)) = doc.get_mut(field.name) {
                    apply_defaults(children, group);
                }
            }
            FieldType::Array { fields: children } => {
                if let Some(Value::Array(items)) = doc.get_mut(field.name) {
                    for item in items.iter_mut() {
                        if let Value::Object(item) = item {
                            apply_defaults(children, item);
                        }
                    }
                }
            }
            _ => {
                if let Some(default) = &field.default {
                    if is_absent(doc.get(field.name)) {
                        doc.insert(field.name.to_string(), default.clone());
                    }
                }
            }
        }
    }
}

/// Drop keys the schema does not declare. `id` is always kept.
///
/// Returns the dropped top-level and nested key paths.
pub fn sanitize(fields: &[FieldDescriptor], doc: &mut Document) -> Vec<String> {
    let mut dropped = Vec::new();
    sanitize_at(fields, doc, "", &mut dropped);
    dropped
}

fn sanitize_at(
    fields: &[FieldDescriptor],
    doc: &mut Document,
    prefix: &str,
    dropped: &mut Vec<String>,
) {
    doc.retain(|key, _| {
        let keep = key == ID_FIELD || fields.iter().any(|f| f.name == key);
        if !keep {
            dropped.push(format!("{prefix}{key}"));
        }
        keep
    });

    for field in fields {
        match (&field.field_type, doc.get_mut(field.name)) {
            (FieldType::Group { fields: children }, Some(Value::Object(group))) => {
                let nested = format!("{prefix}{}.", field.name);
                sanitize_at(children, group, &nested, dropped);
            }
            (FieldType::Array { fields: children }, Some(Value::Array(items))) => {
                for (i, item) in items.iter_mut().enumerate() {
                    if let Value::Object(item) = item {
                        let nested = format!("{prefix}{}.{i}.", field.name);
                        sanitize_at(children, item, &nested, dropped);
                    }
                }
            }
            _ => {}
        }
    }
}
