//! Pre-write hooks.
//!
//! [`derive_slug`] is the single transformation applied before a document
//! is validated and handed to the store. It runs on create only and only
//! when the caller left the slug empty; an existing slug is never replaced.

use serde_json::Value;

use vellum_core::{Document, Operation, composite_slug, normalize_slug};

use crate::collection::{CollectionSchema, SLUG_FIELD, SlugSource};

fn non_empty_str<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    doc.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Fill `slug` from the schema's slug source.
///
/// Returns the derived slug when one was written. Nothing happens when:
///
/// - the operation is not [`Operation::Create`]
/// - the document already has a non-empty slug
/// - the schema has no slug source
/// - any source field is missing or empty
pub fn derive_slug(
    schema: &CollectionSchema,
    doc: &mut Document,
    operation: Operation,
) -> Option<String> {
    if operation != Operation::Create || non_empty_str(doc, SLUG_FIELD).is_some() {
        return None;
    }

    let slug = match schema.slug_source {
        SlugSource::None => return None,
        SlugSource::Field(source) => normalize_slug(non_empty_str(doc, source)?),
        SlugSource::Composite(first, second) => {
            composite_slug(non_empty_str(doc, first)?, non_empty_str(doc, second)?)
        }
    };

    log::debug!("derived {} slug '{}'", schema.name, slug);
    doc.insert(SLUG_FIELD.to_string(), Value::String(slug.clone()));
    Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_derive_from_title_on_create() {
        let schema = collections::pages();
        let mut d = doc(json!({"title": "How It Works"}));
        let slug = derive_slug(&schema, &mut d, Operation::Create);
        assert_eq!(slug.as_deref(), Some("how-it-works"));
        assert_eq!(d["slug"], "how-it-works");
    }

    #[test]
    fn test_explicit_slug_is_kept() {
        let schema = collections::pages();
        let mut d = doc(json!({"title": "How It Works", "slug": "process"}));
        assert!(derive_slug(&schema, &mut d, Operation::Create).is_none());
        assert_eq!(d["slug"], "process");
    }

    #[test]
    fn test_empty_slug_counts_as_absent() {
        let schema = collections::services();
        let mut d = doc(json!({"title": "Car Title Loans", "slug": ""}));
        derive_slug(&schema, &mut d, Operation::Create);
        assert_eq!(d["slug"], "car-title-loans");
    }

    #[test]
    fn test_no_derivation_on_update() {
        let schema = collections::pages();
        let mut d = doc(json!({"title": "Renamed"}));
        assert!(derive_slug(&schema, &mut d, Operation::Update).is_none());
        assert!(d.get("slug").is_none());
    }

    #[test]
    fn test_state_slug_from_state_name() {
        let schema = collections::state_pages();
        let mut d = doc(json!({"state": "New Mexico", "stateCode": "NM"}));
        derive_slug(&schema, &mut d, Operation::Create);
        assert_eq!(d["slug"], "new-mexico");
    }

    #[test]
    fn test_city_slug_is_composite() {
        let schema = collections::city_pages();
        let mut d = doc(json!({"city": "Los Angeles", "state": "California"}));
        derive_slug(&schema, &mut d, Operation::Create);
        assert_eq!(d["slug"], "los-angeles-california");
    }

    #[test]
    fn test_city_slug_needs_both_halves() {
        let schema = collections::city_pages();
        let mut d = doc(json!({"city": "Los Angeles"}));
        assert!(derive_slug(&schema, &mut d, Operation::Create).is_none());
        assert!(d.get("slug").is_none());
    }

    #[test]
    fn test_global_never_derives() {
        let schema = collections::settings();
        let mut d = doc(json!({"siteName": "Loans"}));
        assert!(derive_slug(&schema, &mut d, Operation::Create).is_none());
    }
}
