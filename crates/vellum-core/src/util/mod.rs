//! Utility modules.
//!
//! # Modules
//!
//! - [`slug`]: Human text to URL-safe identifier normalisation

pub mod slug;
