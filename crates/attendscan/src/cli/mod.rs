//! Command-line interface for attendscan.
//!
//! This module provides the CLI structure and the line protocol used by the
//! interactive `scan` command.

mod commands;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, LookupCommand};
pub use input::{parse_line, InputLine};

/// attendscan - Check attendees in by scanning their registration code
///
/// Looks up a scanned barcode or QR code against the registration endpoint
/// and shows the attendee's details and registered events.
#[derive(Debug, Parser)]
#[command(name = "attendscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a single code and print the result
    Lookup(LookupCommand),

    /// Read scanned codes from stdin, one per line
    ///
    /// An empty line is a cancelled scan. `:done` or `:clear` resets the
    /// display; `:quit` exits.
    Scan,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
