//! The storage collaborator contract.
//!
//! A [`ContentStore`] persists documents per collection and answers finds.
//! It knows nothing about callers: visibility and authorisation are applied
//! by [`ContentService`](crate::ContentService) before the store is called.
//!
//! Implementations must:
//!
//! - return finds in storage order unless a sort is given, sort before
//!   applying the limit, and place documents missing the sort key last
//! - reject writes that duplicate a unique field with
//!   [`Error::Validation`](vellum_core::Error::Validation) naming that field,
//!   leaving the store unchanged
//! - perform the uniqueness check and the write atomically
//! - run an update's [`Mutation`] and the write under one lock, so
//!   concurrent updates to the same document never lose each other
//!
//! Transient failures surface as [`Error::Storage`](vellum_core::Error::Storage)
//! and are not retried by callers.

use async_trait::async_trait;

use vellum_core::{Document, FindOptions, Result, Where};

/// Computes the new version of a document from its current one.
///
/// An `Err` aborts the update and leaves the document unchanged.
pub type Mutation<'a> = Box<dyn FnOnce(Document) -> Result<Document> + Send + 'a>;

/// Persistence and query execution for content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Documents in `collection` matching `filter`.
    async fn find(
        &self,
        collection: &str,
        filter: &Where,
        options: &FindOptions,
    ) -> Result<Vec<Document>>;

    /// A single document by id.
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// The singleton document for a global. Never-written globals yield
    /// their schema defaults.
    async fn find_global(&self, slug: &str) -> Result<Document>;

    /// Store a new document, assigning an `id` if it has none.
    async fn insert(&self, collection: &str, doc: Document) -> Result<Document>;

    /// Replace the document with this id by `mutate(current)`.
    ///
    /// The store keeps the id; `mutate` cannot move a document.
    async fn update(&self, collection: &str, id: &str, mutate: Mutation<'_>) -> Result<Document>;

    /// Hard-delete the document with this id.
    async fn remove(&self, collection: &str, id: &str) -> Result<()>;

    /// Replace a global's singleton document by `mutate(current)`, where
    /// `current` is what [`find_global`](Self::find_global) would return.
    async fn update_global(&self, slug: &str, mutate: Mutation<'_>) -> Result<Document>;

    /// Number of documents matching `filter`.
    async fn count(&self, collection: &str, filter: &Where) -> Result<usize> {
        Ok(self
            .find(collection, filter, &FindOptions::default())
            .await?
            .len())
    }
}
