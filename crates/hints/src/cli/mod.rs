//! Command-line interface for hints.
//!
//! This module provides the CLI structure and command handlers for the
//! `hints` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DeckCommand, SaveWindowArgs, WindowCommand};

/// hints - Per-aircraft checklist image overlay
///
/// Inspect the hint images an aircraft would show, exercise the overlay
/// window position store, and list the command identifiers the host
/// integration registers.
#[derive(Debug, Parser)]
#[command(name = "hints")]
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
    /// Inspect an aircraft's hint deck
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Manage the saved overlay window position
    #[command(subcommand)]
    Window(WindowCommand),

    /// List the host command identifiers
    Commands {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

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
