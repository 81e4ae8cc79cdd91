//! Typed site queries for Vellum.
//!
//! # Modules
//!
//! - [`types`]: Typed records and the [`Record`] trait
//! - [`site`]: [`SiteQueries`], the visitor-facing helpers
//! - [`navigation`]: Site menu filtering and ordering

#![doc = include_str!("../README.md")]

pub mod navigation;
pub mod site;
pub mod types;

pub use navigation::{in_nav, nav_pages};
pub use site::SiteQueries;
pub use types::{
    CityPage, ContactInfo, DefaultSeo, LegalDisclaimers, NamedItem, Page, PageTemplate, Record,
    SeoMeta, Service, Settings, SocialLinks, StatePage,
};

pub use vellum_core::{Error, Result};
