//! Storage contract, reference store and content pipeline for Vellum.
//!
//! # Modules
//!
//! - [`store`]: The [`ContentStore`] collaborator contract
//! - [`memory`]: [`MemoryStore`], an in-process implementation
//! - [`service`]: [`ContentService`], the read/write pipeline
//! - [`seed`]: Loading content from JSON files

#![doc = include_str!("../README.md")]

pub mod memory;
pub mod seed;
pub mod service;
pub mod store;

pub use memory::MemoryStore;
pub use seed::{SeedFailure, SeedReport, load_seed};
pub use service::ContentService;
pub use store::{ContentStore, Mutation};

pub use vellum_core::{Document, Error, Result};
