//! Content schema registry for Vellum.
//!
//! # Modules
//!
//! - [`field`]: Field descriptors and semantic types
//! - [`collection`]: Collection and global schemas
//! - [`collections`]: The site's standard content types
//! - [`registry`]: Lookup of schemas by name
//! - [`document`]: Defaults and sanitising driven by a schema
//! - [`hooks`]: Pre-write slug derivation
//! - [`validation`]: Constraint checking

#![doc = include_str!("../README.md")]

pub mod collection;
pub mod collections;
pub mod document;
pub mod field;
pub mod hooks;
pub mod registry;
pub mod validation;

pub use collection::{CollectionSchema, SchemaKind, SlugSource};
pub use document::{apply_defaults, sanitize};
pub use field::{FieldDescriptor, FieldType};
pub use hooks::derive_slug;
pub use registry::SchemaRegistry;
pub use validation::{ValidationReport, validate};

// Re-export core types used throughout the schema API
pub use vellum_core::{Document, Error, Result};
