//! Command-line interface for Vellum.
//!
//! # Key Abstractions
//!
//! - [`VellumCli<C>`]: CLI application parameterized over a config provider
//! - [`VellumConfig`]: `confyg`-loaded configuration

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod content_handlers;

pub use app::VellumCli;
pub use cli::{BaseCommand, CliArgs, ConfigAction, QueryAction};
pub use config::VellumConfig;
