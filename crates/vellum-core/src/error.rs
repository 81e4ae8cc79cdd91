//! Error types for Vellum operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Vellum crates. Uses `thiserror` for derive macros.
//!
//! Lookups that find nothing are not errors: query helpers return `Ok(None)`.
//! [`Error::NotFound`] is reserved for writes addressing a record that does
//! not exist.

use std::path::Path;

use thiserror::Error;

use crate::violation::{FieldViolation, Rule};

/// Errors that can occur in Vellum operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record addressed by a write does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Collection or global name is not in the schema registry.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A write broke one or more schema constraints. Nothing was written.
    #[error("Validation failed for {collection}: {}", join_violations(.violations))]
    Validation {
        collection: String,
        violations: Vec<FieldViolation>,
    },

    /// The caller may not perform this operation.
    #[error("Forbidden: {operation} on {target} requires an authenticated caller")]
    Forbidden { operation: String, target: String },

    /// Failure reported by the storage collaborator.
    #[error("Storage error: {0}")]
    Storage(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Wrap an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create a validation error from collected violations.
    pub fn validation(collection: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self::Validation {
            collection: collection.into(),
            violations,
        }
    }

    /// Create a uniqueness violation for a single field.
    pub fn unique(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self::validation(collection, vec![FieldViolation::new(field, Rule::Unique)])
    }

    /// Create a forbidden error.
    pub fn forbidden(operation: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Forbidden {
            operation: operation.into(),
            target: target.into(),
        }
    }

    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is an authorization denial.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Field violations carried by a validation error, empty otherwise.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type alias using Vellum's Error type.
pub type Result<T> = std::result::Result<T, Error>;
