//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Which bucket series to export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Period {
    /// One row per calendar day (YYYY-MM-DD)
    #[default]
    Daily,
    /// One row per calendar month (YYYY-MM)
    Monthly,
    /// One row per device type
    Devices,
}

/// Reusable environment signal arguments.
///
/// These stand in for what a browser would report through `navigator`.
#[derive(Debug, Clone, Default, Args)]
pub struct EnvArgs {
    /// User-agent string to classify
    #[arg(long, env = "SITETRACK_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Platform string (e.g. MacIntel, Win32, "Linux x86_64")
    #[arg(long, env = "SITETRACK_PLATFORM")]
    pub platform: Option<String>,

    /// Report touch support (overrides --no-touch and config)
    #[arg(long, conflicts_with = "no_touch")]
    pub touch: bool,

    /// Report no touch support (overrides config)
    #[arg(long, conflicts_with = "touch")]
    pub no_touch: bool,
}

impl EnvArgs {
    /// Resolve touch setting: explicit flags override config
    pub fn resolve_touch(&self, config_touch: Option<bool>) -> bool {
        if self.touch {
            true
        } else if self.no_touch {
            false
        } else {
            config_touch.unwrap_or(false)
        }
    }
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format (defaults to config, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output compact JSON (no pretty-printing)
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser)]
#[command(name = "sitetrack")]
#[command(author, version, about = "Local visit counters and device statistics", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Storage file holding the counters (defaults to config, then the platform data dir)
    #[arg(long, global = true, env = "SITETRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record one visit from the given environment
    Record {
        #[command(flatten)]
        env: EnvArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Local date/time of the visit (YYYY-MM-DD[THH:MM[:SS]]); defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Show visitor statistics
    Stats {
        #[command(flatten)]
        env: EnvArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Local date/time to report for (YYYY-MM-DD[THH:MM[:SS]]); defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Classify environment signals without recording anything
    Classify {
        #[command(flatten)]
        env: EnvArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the stored visitor identity
    Identity,

    /// Export bucket counters as CSV
    Export {
        /// Series to export
        #[arg(short, long, value_enum, default_value = "daily")]
        period: Period,

        /// Omit header row (useful for appending)
        #[arg(long)]
        no_header: bool,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration keys that can be set
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Storage file path
    DataFile,
    /// Default output format
    Format,
    /// Disable colored output
    NoColor,
    /// Default user-agent string
    UserAgent,
    /// Default platform string
    Platform,
    /// Default touch support
    Touch,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the config file path
    Path,

    /// Show current configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Remove a configuration value
    Unset {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },
}
