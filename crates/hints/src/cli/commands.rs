//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Hint deck commands.
#[derive(Debug, Subcommand)]
pub enum DeckCommand {
    /// List the hints that would load for an aircraft, in cycling order
    List {
        /// Path to the aircraft directory (its hints subdirectory is scanned)
        aircraft_dir: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Decode every hint for an aircraft and report failures
    Check {
        /// Path to the aircraft directory (its hints subdirectory is scanned)
        aircraft_dir: PathBuf,
    },
}

/// Overlay window position commands.
#[derive(Debug, Subcommand)]
pub enum WindowCommand {
    /// Show the saved window position
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Save a window position
    Save(SaveWindowArgs),

    /// Reset the window position to the default placement
    Reset {
        /// Screen width in pixels
        #[arg(long)]
        screen_width: u32,

        /// Screen height in pixels
        #[arg(long)]
        screen_height: u32,
    },
}

/// Arguments for `window save`.
#[derive(Debug, Args)]
pub struct SaveWindowArgs {
    /// Left edge in screen coordinates
    #[arg(long, allow_hyphen_values = true)]
    pub left: i32,

    /// Top edge in screen coordinates
    #[arg(long, allow_hyphen_values = true)]
    pub top: i32,

    /// Width in pixels
    #[arg(long)]
    pub width: u32,

    /// Height in pixels
    #[arg(long)]
    pub height: u32,
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
