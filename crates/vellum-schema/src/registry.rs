//! Schema registry.
//!
//! Holds every collection and global schema and resolves them by name.
//! The registry is immutable once built; share it behind an `Arc`.

use vellum_core::{Error, Result};

use crate::collection::CollectionSchema;
use crate::collections;

/// Lookup table of content schemas.
#[derive(Clone, Debug)]
pub struct SchemaRegistry {
    schemas: Vec<CollectionSchema>,
}

impl SchemaRegistry {
    /// Build a registry from explicit schemas.
    pub fn new(schemas: Vec<CollectionSchema>) -> Self {
        Self { schemas }
    }

    /// The site's standard content types: pages, services, state pages,
    /// city pages and the settings global.
    pub fn standard() -> Self {
        Self::new(vec![
            collections::pages(),
            collections::services(),
            collections::state_pages(),
            collections::city_pages(),
            collections::settings(),
        ])
    }

    /// Resolve a schema by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCollection`] if no schema has this name.
    pub fn get(&self, name: &str) -> Result<&CollectionSchema> {
        self.schemas
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::UnknownCollection(name.to_string()))
    }

    /// Resolve a collection (not a global) by name.
    pub fn collection(&self, name: &str) -> Result<&CollectionSchema> {
        let schema = self.get(name)?;
        if schema.is_global() {
            return Err(Error::UnknownCollection(format!("{name} is a global")));
        }
        Ok(schema)
    }

    /// Resolve a global by name.
    pub fn global(&self, name: &str) -> Result<&CollectionSchema> {
        let schema = self.get(name)?;
        if !schema.is_global() {
            return Err(Error::UnknownCollection(format!("{name} is not a global")));
        }
        Ok(schema)
    }

    /// All schemas in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectionSchema> {
        self.schemas.iter()
    }

    /// Collection schemas only.
    pub fn collections(&self) -> impl Iterator<Item = &CollectionSchema> {
        self.schemas.iter().filter(|s| !s.is_global())
    }

    /// Global schemas only.
    pub fn globals(&self) -> impl Iterator<Item = &CollectionSchema> {
        self.schemas.iter().filter(|s| s.is_global())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
