//! In-memory content store.
//!
//! Keeps each collection as an insertion-ordered `Vec` behind a
//! `tokio::sync::RwLock`. Cloning a `MemoryStore` is cheap and clones share
//! the same data.
//!
//! References (uploads, relationships) are returned exactly as stored; the
//! memory store holds no media collection, so `FindOptions::depth` has
//! nothing to populate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use vellum_core::{Document, Error, FindOptions, Result, Where};
use vellum_schema::collection::ID_FIELD;
use vellum_schema::{CollectionSchema, SchemaRegistry, apply_defaults};

use crate::store::{ContentStore, Mutation};

#[derive(Default)]
struct Collections {
    collections: HashMap<String, Vec<Document>>,
    globals: HashMap<String, Document>,
}

/// Thread-safe in-process [`ContentStore`].
#[derive(Clone)]
pub struct MemoryStore {
    registry: Arc<SchemaRegistry>,
    data: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create an empty store for the collections in `registry`.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            data: Arc::new(RwLock::new(Collections::default())),
        }
    }

    /// Create an empty store for the standard site collections.
    pub fn standard() -> Self {
        Self::new(Arc::new(SchemaRegistry::standard()))
    }

    /// The registry this store enforces.
    pub fn registry(&self) -> Arc<SchemaRegistry> {
        Arc::clone(&self.registry)
    }
}

fn doc_id(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

/// Reject `doc` if another document already holds one of its unique values.
fn check_unique(
    schema: &CollectionSchema,
    existing: &[Document],
    doc: &Document,
    exclude_id: Option<&str>,
) -> Result<()> {
    for field in schema.unique_fields() {
        let Some(value) = doc.get(field).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = existing
            .iter()
            .filter(|other| exclude_id.is_none() || doc_id(other) != exclude_id)
            .any(|other| other.get(field) == Some(value));
        if taken {
            log::debug!("{}: duplicate {} {}", schema.name, field, value);
            return Err(Error::unique(schema.name, field));
        }
    }
    Ok(())
}

/// A global's stored document, or its defaults if never written.
fn global_or_defaults(data: &Collections, schema: &CollectionSchema) -> Document {
    match data.globals.get(schema.name) {
        Some(doc) => doc.clone(),
        None => {
            let mut doc = Document::new();
            apply_defaults(&schema.fields, &mut doc);
            doc
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Where,
        options: &FindOptions,
    ) -> Result<Vec<Document>> {
        self.registry.collection(collection)?;
        let data = self.data.read().await;

        let mut docs: Vec<Document> = data
            .collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = &options.sort {
            // `sort_by` is stable: ties keep insertion order.
            docs.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = options.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.registry.collection(collection)?;
        let data = self.data.read().await;
        Ok(data
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| doc_id(d) == Some(id)))
            .cloned())
    }

    async fn find_global(&self, slug: &str) -> Result<Document> {
        let schema = self.registry.global(slug)?;
        let data = self.data.read().await;
        Ok(global_or_defaults(&data, schema))
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> Result<Document> {
        let schema = self.registry.collection(collection)?;
        if doc_id(&doc).is_none() {
            doc.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        let mut data = self.data.write().await;
        let docs = data.collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| doc_id(d) == doc_id(&doc)) {
            return Err(Error::unique(collection, ID_FIELD));
        }
        check_unique(schema, docs, &doc, None)?;
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn update(&self, collection: &str, id: &str, mutate: Mutation<'_>) -> Result<Document> {
        let schema = self.registry.collection(collection)?;

        let mut data = self.data.write().await;
        let docs = data.collections.entry(collection.to_string()).or_default();
        let index = docs
            .iter()
            .position(|d| doc_id(d) == Some(id))
            .ok_or_else(|| Error::not_found(format!("{collection}/{id}")))?;
        let mut doc = mutate(docs[index].clone())?;
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        check_unique(schema, docs, &doc, Some(id))?;
        docs[index] = doc.clone();
        Ok(doc)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<()> {
        self.registry.collection(collection)?;
        let mut data = self.data.write().await;
        let docs = data.collections.entry(collection.to_string()).or_default();
        let index = docs
            .iter()
            .position(|d| doc_id(d) == Some(id))
            .ok_or_else(|| Error::not_found(format!("{collection}/{id}")))?;
        docs.remove(index);
        Ok(())
    }

    async fn update_global(&self, slug: &str, mutate: Mutation<'_>) -> Result<Document> {
        let schema = self.registry.global(slug)?;
        let mut data = self.data.write().await;
        let doc = mutate(global_or_defaults(&data, schema))?;
        data.globals.insert(slug.to_string(), doc.clone());
        Ok(doc)
    }
}
