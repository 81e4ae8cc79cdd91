//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "VELLUM_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Print version information.
    Version,

    /// Check configuration and content files.
    Health,

    /// Print the URL slug for a name.
    Slug {
        /// Name to normalise (a page title, state or city).
        text: String,

        /// State name, for a city slug such as `austin-texas`.
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Load every content file and report records that fail validation.
    Validate,

    /// Run a site query against the content files.
    Query(QueryCommand),

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Query-specific subcommands.
#[derive(Parser, Debug)]
pub struct QueryCommand {
    #[command(subcommand)]
    pub command: QueryAction,
}

/// Available site queries. Each prints JSON.
#[derive(Subcommand, Debug)]
pub enum QueryAction {
    /// List published services.
    Services,

    /// A service by slug.
    Service { slug: String },

    /// List published state pages.
    States,

    /// A state page by slug.
    State { slug: String },

    /// A state page by two-letter code (case-insensitive).
    StateCode { code: String },

    /// List published city pages.
    Cities {
        /// Only cities in this state code (case-insensitive).
        #[arg(short, long)]
        state: Option<String>,
    },

    /// A city page by slug.
    City { slug: String },

    /// Site settings.
    Settings,

    /// List published pages.
    Pages,

    /// A page by slug.
    Page { slug: String },

    /// Pages in the site menu, in menu order.
    Nav,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "query.city_limit").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
