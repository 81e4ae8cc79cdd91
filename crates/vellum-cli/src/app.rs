//! VellumCli application.
//!
//! Wires parsed arguments to handlers, generic over the
//! [`ConfigProvider`] so tests and embedders can supply their own config.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vellum_core::traits::ConfigProvider;
use vellum_core::{Result, composite_slug, normalize_slug};

use crate::cli::{BaseCommand, CliArgs};
use crate::config::VellumConfig;
use crate::{config_handlers, content_handlers};

// ============================================================================
// VellumCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct VellumCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl VellumCli<VellumConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = VellumConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> VellumCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Output goes to stderr so query JSON on stdout stays clean.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        tracing::debug!(project = self.config.project_name(), "starting {}", self.name);

        match args.command {
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(BaseCommand::Health) => {
                content_handlers::handle_health(&self.name, &*self.config)
            }
            Some(BaseCommand::Slug { text, state }) => {
                let slug = match state {
                    Some(state) => composite_slug(&text, &state),
                    None => normalize_slug(&text),
                };
                println!("{slug}");
                Ok(())
            }
            Some(BaseCommand::Validate) => content_handlers::handle_validate(&*self.config).await,
            Some(BaseCommand::Query(query_cmd)) => {
                content_handlers::handle_query(&*self.config, query_cmd.command).await
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {} (use --help for usage)", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
