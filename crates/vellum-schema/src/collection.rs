//! Collection and global schemas.

use crate::field::FieldDescriptor;

/// Name of the slug field on every collection.
pub const SLUG_FIELD: &str = "slug";

/// Name of the store-assigned identifier.
pub const ID_FIELD: &str = "id";

/// Whether a schema describes many records or exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    /// A named set of records sharing one schema.
    Collection,
    /// A singleton with exactly one instance site-wide.
    Global,
}

/// Where a collection's slug comes from when the caller omits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlugSource {
    /// No derivation; the slug must be supplied.
    None,
    /// Normalise a single field.
    Field(&'static str),
    /// Normalise two fields independently and join them (`city-state`).
    Composite(&'static str, &'static str),
}

impl SlugSource {
    /// Fields the derivation reads.
    pub fn fields(&self) -> Vec<&'static str> {
        match *self {
            SlugSource::None => vec![],
            SlugSource::Field(f) => vec![f],
            SlugSource::Composite(a, b) => vec![a, b],
        }
    }
}

/// Schema for one collection or global.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionSchema {
    /// Registry name, e.g. `"city-pages"`.
    pub name: &'static str,
    /// Human label.
    pub label: &'static str,
    pub kind: SchemaKind,
    pub fields: Vec<FieldDescriptor>,
    pub slug_source: SlugSource,
}

impl CollectionSchema {
    /// Create a collection schema.
    pub fn collection(
        name: &'static str,
        label: &'static str,
        slug_source: SlugSource,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            name,
            label,
            kind: SchemaKind::Collection,
            fields,
            slug_source,
        }
    }

    /// Create a global (singleton) schema.
    pub fn global(name: &'static str, label: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            label,
            kind: SchemaKind::Global,
            fields,
            slug_source: SlugSource::None,
        }
    }

    pub fn is_global(&self) -> bool {
        self.kind == SchemaKind::Global
    }

    /// Look up a top-level field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Top-level fields whose values must be unique in the collection.
    pub fn unique_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.unique)
            .map(|f| f.name)
            .collect()
    }

    /// Whether records carry a draft/published status.
    pub fn has_status(&self) -> bool {
        self.field(vellum_core::status::STATUS_FIELD).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CollectionSchema {
        CollectionSchema::collection(
            "things",
            "Things",
            SlugSource::Field("title"),
            vec![
                FieldDescriptor::text("title").required(),
                FieldDescriptor::text(SLUG_FIELD).required().unique(),
            ],
        )
    }

    #[test]
    fn test_field_lookup() {
        let schema = sample();
        assert!(schema.field("title").is_some());
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_unique_fields() {
        assert_eq!(sample().unique_fields(), vec!["slug"]);
    }

    #[test]
    fn test_global_has_no_slug_source() {
        let schema = CollectionSchema::global("prefs", "Prefs", vec![]);
        assert!(schema.is_global());
        assert_eq!(schema.slug_source, SlugSource::None);
        assert!(!schema.has_status());
    }

    #[test]
    fn test_slug_source_fields() {
        assert_eq!(
            SlugSource::Composite("city", "state").fields(),
            vec!["city", "state"]
        );
        assert!(SlugSource::None.fields().is_empty());
    }
}
