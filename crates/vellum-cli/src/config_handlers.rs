//! Handler functions for config CLI commands.
//!
//! Each `vellum config` subcommand is split into a function that computes
//! its output and the dispatcher that prints it, so the output can be
//! checked without capturing stdout.

use std::path::{Path, PathBuf};

use vellum_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::VellumConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Takes the raw `--config` path rather than a loaded config: `path` and
/// `init` must work before any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = config_file(config_path)?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(not created yet; `vellum config init` writes the defaults)");
            }
        }
        ConfigAction::Get { key } => {
            let config = VellumConfig::load(config_path)?;
            println!("{}", lookup(&config, &key)?);
        }
        ConfigAction::Init { file, force } => {
            let target = match file {
                Some(file) => PathBuf::from(file),
                None => config_file(None)?,
            };
            write_defaults(&target, force)?;
            println!("Wrote default config to {}", target.display());
        }
        ConfigAction::Export { docker_env } => {
            let config = VellumConfig::load(config_path)?;
            for line in export_lines(&config, docker_env)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}

// ============================================================================
// Command bodies
// ============================================================================

/// The config file `vellum` would read.
fn config_file(config_path: Option<&str>) -> Result<PathBuf> {
    VellumConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("no config directory on this platform; pass --config"))
}

/// Render the value at a dotted key such as `query.city_limit`.
fn lookup(config: &VellumConfig, key: &str) -> Result<String> {
    let tree = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    let value = key
        .split('.')
        .try_fold(&tree, |node, part| node.as_table()?.get(part))
        .ok_or_else(|| Error::config(format!("unknown config key '{key}'")))?;
    render(value)
}

fn render(value: &toml::Value) -> Result<String> {
    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).map_err(|e| Error::config(e.to_string()))?
        }
        scalar => scalar.to_string(),
    })
}

/// Write the default config to `target`, refusing to clobber unless `force`.
fn write_defaults(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists (use --force to replace it)",
            target.display()
        )));
    }
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
    }
    let body = VellumConfig::default().to_toml_string()?;
    std::fs::write(target, body).map_err(|e| Error::io_with_path(e, target))
}

/// `KEY=value` lines, or `--env KEY=value` for `docker run`.
fn export_lines(config: &VellumConfig, docker_env: bool) -> Result<Vec<String>> {
    let prefix = if docker_env { "--env " } else { "" };
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{prefix}{key}={value}"))
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
