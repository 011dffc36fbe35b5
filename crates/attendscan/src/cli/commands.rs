//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Lookup command arguments.
#[derive(Debug, Args)]
pub struct LookupCommand {
    /// The scanned code to look up
    pub code: String,

    /// Print the raw lookup result as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
