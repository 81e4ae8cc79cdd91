//! Vellum Core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all Vellum crates.
//! It has no internal Vellum dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`filter`]: Query predicates and find options handed to the store
//! - [`operation`]: Read/create/update/delete
//! - [`status`]: Draft/published lifecycle
//! - [`traits`]: Core traits for domain abstraction
//! - [`util`]: Slug normalisation
//! - [`violation`]: Field-level validation failures

#![doc = include_str!("../README.md")]

pub mod error;
pub mod filter;
pub mod operation;
pub mod status;
pub mod traits;
pub mod util;
pub mod violation;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use filter::{Condition, Direction, FindOptions, Sort, Where};
pub use operation::Operation;
pub use status::Status;
pub use traits::ConfigProvider;
pub use violation::{FieldViolation, Rule};

/// A stored record: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;

// Convenience re-exports from util
pub use util::slug::{composite_slug, normalize_slug};
