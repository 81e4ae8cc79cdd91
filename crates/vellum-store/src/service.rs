//! The content read/write pipeline.
//!
//! [`ContentService`] is the only way callers touch a [`ContentStore`].
//!
//! Reads: the visibility policy's constraint is added to the caller's
//! filter, so anonymous callers only ever receive published records.
//!
//! Writes run, in order:
//!
//! 1. authorisation (anonymous callers get `Error::Forbidden`)
//! 2. sanitising (undeclared keys are dropped)
//! 3. slug derivation (create only, slug omitted only)
//! 4. defaults
//! 5. validation (all violations reported, nothing written on failure)
//! 6. the store write, which enforces uniqueness

use std::sync::Arc;

use vellum_acl::{Caller, Target, authorize, read_constraint};
use vellum_core::{Document, FindOptions, Operation, Result, Where};
use vellum_schema::collection::ID_FIELD;
use vellum_schema::{
    CollectionSchema, SchemaRegistry, apply_defaults, derive_slug, sanitize, validate,
};

use crate::store::ContentStore;

/// Policy-enforcing front for a [`ContentStore`].
pub struct ContentService<S: ContentStore> {
    store: Arc<S>,
    registry: Arc<SchemaRegistry>,
}

impl<S: ContentStore> Clone for ContentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: ContentStore> ContentService<S> {
    /// Create a service over a store and the registry it should enforce.
    pub fn new(store: Arc<S>, registry: Arc<SchemaRegistry>) -> Self {
        Self { store, registry }
    }

    /// The schemas this service validates against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The underlying store. Writes made through it skip the pipeline.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Find records visible to `caller`.
    pub async fn find(
        &self,
        caller: &Caller,
        collection: &str,
        filter: Where,
        options: &FindOptions,
    ) -> Result<Vec<Document>> {
        self.registry.collection(collection)?;
        authorize(caller, Operation::Read, Target::Collection(collection))?;
        let filter = filter.and_maybe(read_constraint(caller));
        self.store.find(collection, &filter, options).await
    }

    /// First visible record matching `filter`, if any.
    pub async fn find_one(
        &self,
        caller: &Caller,
        collection: &str,
        filter: Where,
        depth: u8,
    ) -> Result<Option<Document>> {
        let options = FindOptions::default().with_limit(1).with_depth(depth);
        let docs = self.find(caller, collection, filter, &options).await?;
        Ok(docs.into_iter().next())
    }

    /// Read a global. Always allowed.
    pub async fn read_global(&self, caller: &Caller, slug: &str) -> Result<Document> {
        self.registry.global(slug)?;
        authorize(caller, Operation::Read, Target::Global(slug))?;
        self.store.find_global(slug).await
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Create a record.
    ///
    /// An omitted slug is derived from the collection's slug source. An
    /// explicit slug is kept as given.
    pub async fn create(
        &self,
        caller: &Caller,
        collection: &str,
        data: Document,
    ) -> Result<Document> {
        let schema = self.registry.collection(collection)?;
        authorize(caller, Operation::Create, Target::Collection(collection))?;

        let doc = prepare(schema, data, Operation::Create)?;
        let stored = self.store.insert(collection, doc).await?;
        log::debug!(
            "created {}/{}",
            collection,
            stored.get(ID_FIELD).and_then(|v| v.as_str()).unwrap_or("?")
        );
        Ok(stored)
    }

    /// Update a record by merging `patch` over its current fields.
    ///
    /// The merge is shallow: a patched group or list replaces the old one.
    /// The slug is never re-derived, even if its source field changes.
    /// Merge, validation and write happen under the store's lock, so
    /// concurrent patches to different fields all survive.
    pub async fn update(
        &self,
        caller: &Caller,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<Document> {
        let schema = self.registry.collection(collection)?;
        authorize(caller, Operation::Update, Target::Collection(collection))?;

        let stored = self
            .store
            .update(
                collection,
                id,
                Box::new(move |current| prepare(schema, merge(current, patch), Operation::Update)),
            )
            .await?;
        log::debug!("updated {collection}/{id}");
        Ok(stored)
    }

    /// Hard-delete a record.
    pub async fn delete(&self, caller: &Caller, collection: &str, id: &str) -> Result<()> {
        self.registry.collection(collection)?;
        authorize(caller, Operation::Delete, Target::Collection(collection))?;
        self.store.remove(collection, id).await?;
        log::debug!("deleted {collection}/{id}");
        Ok(())
    }

    /// Update a global by merging `patch` over its current fields.
    pub async fn update_global(
        &self,
        caller: &Caller,
        slug: &str,
        patch: Document,
    ) -> Result<Document> {
        let schema = self.registry.global(slug)?;
        authorize(caller, Operation::Update, Target::Global(slug))?;

        let stored = self
            .store
            .update_global(
                slug,
                Box::new(move |current| prepare(schema, merge(current, patch), Operation::Update)),
            )
            .await?;
        log::debug!("updated global {slug}");
        Ok(stored)
    }
}

/// Shallow merge; the patch cannot change `id`.
fn merge(mut base: Document, mut patch: Document) -> Document {
    patch.remove(ID_FIELD);
    base.extend(patch);
    base
}

/// Turn caller input into a document ready for the store.
fn prepare(schema: &CollectionSchema, mut doc: Document, operation: Operation) -> Result<Document> {
    let dropped = sanitize(&schema.fields, &mut doc);
    if !dropped.is_empty() {
        log::debug!("{}: ignoring undeclared fields {:?}", schema.name, dropped);
    }
    derive_slug(schema, &mut doc, operation);
    apply_defaults(&schema.fields, &mut doc);
    validate(schema, &doc).into_result(schema.name)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use crate::store::Mutation;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::time::Duration;
    use vellum_core::{Condition, Error, Rule};
    use vellum_schema::collections::{CITY_PAGES, PAGES, SETTINGS};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn service() -> ContentService<MemoryStore> {
        let registry = Arc::new(SchemaRegistry::standard());
        let store = Arc::new(MemoryStore::new(Arc::clone(&registry)));
        ContentService::new(store, registry)
    }

    fn editor() -> Caller {
        Caller::authenticated("editor@example.com")
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_defaults() {
        let svc = service();
        let page = svc
            .create(&editor(), PAGES, doc(json!({"title": "How It Works"})))
            .await
            .unwrap();
        assert_eq!(page["slug"], "how-it-works");
        assert_eq!(page["status"], "draft");
        assert_eq!(page["template"], "default");
        assert_eq!(page["showInNav"], false);
        assert!(page["id"].is_string());
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_slug() {
        let svc = service();
        let page = svc
            .create(
                &editor(),
                PAGES,
                doc(json!({"title": "How It Works", "slug": "process"})),
            )
            .await
            .unwrap();
        assert_eq!(page["slug"], "process");
    }

    #[tokio::test]
    async fn test_duplicate_derived_slug_is_rejected() {
        let svc = service();
        svc.create(&editor(), PAGES, doc(json!({"title": "About Us"})))
            .await
            .unwrap();
        let err = svc
            .create(&editor(), PAGES, doc(json!({"title": "About us!"})))
            .await
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "slug");
        assert_eq!(err.violations()[0].rule, Rule::Unique);
    }

    #[tokio::test]
    async fn test_city_slug_composite() {
        let svc = service();
        let city = svc
            .create(
                &editor(),
                CITY_PAGES,
                doc(json!({"city": "Los Angeles", "state": "California", "stateCode": "CA"})),
            )
            .await
            .unwrap();
        assert_eq!(city["slug"], "los-angeles-california");
    }

    #[tokio::test]
    async fn test_invalid_write_is_not_applied() {
        let svc = service();
        let err = svc
            .create(
                &editor(),
                PAGES,
                doc(json!({"title": "About", "metaTitle": "m".repeat(71)})),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.violations()[0].field, "metaTitle");
        let all = svc
            .find(&editor(), PAGES, Where::new(), &FindOptions::default())
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_untitled_page_fails_required() {
        let svc = service();
        let err = svc
            .create(&editor(), PAGES, Document::new())
            .await
            .unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.clone()).collect();
        assert_eq!(fields, vec!["title", "slug"]);
    }

    #[tokio::test]
    async fn test_anonymous_mutations_are_forbidden() {
        let svc = service();
        let anon = Caller::Anonymous;
        let err = svc
            .create(&anon, PAGES, doc(json!({"title": "X"})))
            .await
            .unwrap_err();
        assert!(err.is_forbidden());

        let page = svc
            .create(&editor(), PAGES, doc(json!({"title": "X"})))
            .await
            .unwrap();
        let id = page["id"].as_str().unwrap();

        assert!(svc
            .update(&anon, PAGES, id, doc(json!({"title": "Y"})))
            .await
            .unwrap_err()
            .is_forbidden());
        assert!(svc.delete(&anon, PAGES, id).await.unwrap_err().is_forbidden());
        assert!(svc
            .update_global(&anon, SETTINGS, doc(json!({"siteName": "Hacked"})))
            .await
            .unwrap_err()
            .is_forbidden());
    }

    #[tokio::test]
    async fn test_anonymous_reads_only_published() {
        let svc = service();
        svc.create(
            &editor(),
            PAGES,
            doc(json!({"title": "Draft page"})),
        )
        .await
        .unwrap();
        svc.create(
            &editor(),
            PAGES,
            doc(json!({"title": "Live page", "status": "published"})),
        )
        .await
        .unwrap();

        let public = svc
            .find(&Caller::Anonymous, PAGES, Where::new(), &FindOptions::default())
            .await
            .unwrap();
        assert_eq!(public.len(), 1);
        assert!(public.iter().all(|d| d["status"] == "published"));

        let all = svc
            .find(&editor(), PAGES, Where::new(), &FindOptions::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_widen_to_drafts() {
        let svc = service();
        svc.create(&editor(), PAGES, doc(json!({"title": "Secret"})))
            .await
            .unwrap();
        let filter = Where::new().and(Condition::equals("status", "draft"));
        let found = svc
            .find(&Caller::Anonymous, PAGES, filter, &FindOptions::default())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_update_never_rederives_slug() {
        let svc = service();
        let page = svc
            .create(&editor(), PAGES, doc(json!({"title": "Old Name"})))
            .await
            .unwrap();
        let id = page["id"].as_str().unwrap();
        let updated = svc
            .update(&editor(), PAGES, id, doc(json!({"title": "New Name", "id": "other"})))
            .await
            .unwrap();
        assert_eq!(updated["slug"], "old-name");
        assert_eq!(updated["title"], "New Name");
        assert_eq!(updated["id"], id);
    }

    #[tokio::test]
    async fn test_update_validates_merged_document() {
        let svc = service();
        let page = svc
            .create(&editor(), PAGES, doc(json!({"title": "About"})))
            .await
            .unwrap();
        let id = page["id"].as_str().unwrap();
        let err = svc
            .update(&editor(), PAGES, id, doc(json!({"title": ""})))
            .await
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "title");
    }

    /// A store whose mutations take a while, widening the window in which
    /// concurrent updates overlap.
    struct SlowStore(MemoryStore);

    #[async_trait]
    impl ContentStore for SlowStore {
        async fn find(
            &self,
            collection: &str,
            filter: &Where,
            options: &FindOptions,
        ) -> Result<Vec<Document>> {
            self.0.find(collection, filter, options).await
        }

        async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
            self.0.find_by_id(collection, id).await
        }

        async fn find_global(&self, slug: &str) -> Result<Document> {
            self.0.find_global(slug).await
        }

        async fn insert(&self, collection: &str, doc: Document) -> Result<Document> {
            self.0.insert(collection, doc).await
        }

        async fn update(
            &self,
            collection: &str,
            id: &str,
            mutate: Mutation<'_>,
        ) -> Result<Document> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let slow: Mutation<'_> = Box::new(move |current| {
                std::thread::sleep(Duration::from_millis(50));
                mutate(current)
            });
            self.0.update(collection, id, slow).await
        }

        async fn remove(&self, collection: &str, id: &str) -> Result<()> {
            self.0.remove(collection, id).await
        }

        async fn update_global(&self, slug: &str, mutate: Mutation<'_>) -> Result<Document> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.0.update_global(slug, mutate).await
        }
    }

    fn slow_service() -> ContentService<SlowStore> {
        let registry = Arc::new(SchemaRegistry::standard());
        let store = Arc::new(SlowStore(MemoryStore::new(Arc::clone(&registry))));
        ContentService::new(store, registry)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_patches_to_different_fields_both_apply() {
        let svc = slow_service();
        let page = svc
            .create(&editor(), PAGES, doc(json!({"title": "About"})))
            .await
            .unwrap();
        let id = page["id"].as_str().unwrap().to_string();

        let (ed_a, ed_b) = (editor(), editor());
        let (a, b) = tokio::join!(
            svc.update(&ed_a, PAGES, &id, doc(json!({"excerpt": "x"}))),
            svc.update(&ed_b, PAGES, &id, doc(json!({"navOrder": 5}))),
        );
        a.unwrap();
        b.unwrap();

        let current = svc.store().find_by_id(PAGES, &id).await.unwrap().unwrap();
        assert_eq!(current["excerpt"], "x");
        assert_eq!(current["navOrder"], 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_settings_patches_both_apply() {
        let svc = slow_service();
        let first = svc.clone();
        let second = svc.clone();
        let a = tokio::spawn(async move {
            first
                .update_global(&editor(), SETTINGS, doc(json!({"siteName": "Loans Now"})))
                .await
        });
        let b = tokio::spawn(async move {
            second
                .update_global(
                    &editor(),
                    SETTINGS,
                    doc(json!({"contactInfo": {"phone": "555-0100"}})),
                )
                .await
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let settings = svc.read_global(&Caller::Anonymous, SETTINGS).await.unwrap();
        assert_eq!(settings["siteName"], "Loans Now");
        assert_eq!(settings["contactInfo"]["phone"], "555-0100");
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let svc = service();
        let err = svc
            .update(&editor(), PAGES, "missing", Document::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_one_absent_is_none() {
        let svc = service();
        let filter = Where::new().and(Condition::equals("slug", "nope"));
        let found = svc
            .find_one(&Caller::Anonymous, PAGES, filter, 0)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_settings_readable_by_anyone_and_merged_on_update() {
        let svc = service();
        let settings = svc.read_global(&Caller::Anonymous, SETTINGS).await.unwrap();
        assert_eq!(settings["siteName"], "Direct Title Loans");

        svc.update_global(
            &editor(),
            SETTINGS,
            doc(json!({"contactInfo": {"phone": "555-0100", "email": "help@loans.example"}})),
        )
        .await
        .unwrap();

        let settings = svc.read_global(&Caller::Anonymous, SETTINGS).await.unwrap();
        assert_eq!(settings["siteName"], "Direct Title Loans");
        assert_eq!(settings["contactInfo"]["phone"], "555-0100");
        assert_eq!(
            settings["defaultSeo"]["titleTemplate"],
            "%s | Direct Title Loans"
        );
    }

    #[tokio::test]
    async fn test_settings_update_is_validated() {
        let svc = service();
        let err = svc
            .update_global(
                &editor(),
                SETTINGS,
                doc(json!({"contactInfo": {"email": "nope"}})),
            )
            .await
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "contactInfo.email");
    }

    #[tokio::test]
    async fn test_globals_are_not_collections() {
        let svc = service();
        assert!(svc.create(&editor(), SETTINGS, Document::new()).await.is_err());
        assert!(svc.read_global(&editor(), PAGES).await.is_err());
    }
}
