//! Access control layer for Vellum.
//!
//! - [`Caller`]: who is asking
//! - [`policy`]: read/mutate decisions and the anonymous read constraint

#![doc = include_str!("../README.md")]

pub mod caller;
pub mod policy;

pub use caller::Caller;
pub use policy::{Target, authorize, can_mutate, can_read, can_read_global, read_constraint};
