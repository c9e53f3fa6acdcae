//! # multidrag CLI Module
//!
//! This module implements the CLI interface for multidrag.
//!
//! ## Available Commands
//!
//! - `init` - Write the demo board to a file
//! - `show` - Print the board
//! - `validate` - Check board invariants
//! - `replay` - Replay a script of host events against the board

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use multidrag_core::{BoardError, Platform};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// multidrag - multi-select drag and drop board
///
/// Loads a board, applies selection gestures and group drags, and prints or
/// saves the result.
#[derive(Parser, Debug)]
#[command(name = "multidrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file (default: ./multidrag.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the board file (default: the built-in demo board)
    #[arg(short, long, global = true)]
    pub board: Option<PathBuf>,

    /// Platform for modifier keys: windows, mac or linux
    #[arg(short, long, global = true, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the demo board to a file
    Init {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite the file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show the board
    Show,

    /// Validate board invariants
    Validate,

    /// Replay host events from a script file
    Replay {
        /// Path to the JSON event script
        #[arg(short, long)]
        script: PathBuf,

        /// Write the resulting board back to the board file
        #[arg(long)]
        save: bool,
    },
}

/// Parse a platform name.
pub fn parse_platform(name: &str) -> Result<Platform, String> {
    match name.to_ascii_lowercase().as_str() {
        "windows" => Ok(Platform::Windows),
        "mac" | "macos" => Ok(Platform::Mac),
        "linux" => Ok(Platform::Linux),
        other => Err(format!(
            "unknown platform '{}'. Use: windows, mac, linux",
            other
        )),
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
///
/// Flags take precedence over the configuration file.
pub fn execute(cli: Cli, config: &Config) -> Result<(), BoardError> {
    let board = cli.board.or_else(|| config.board.clone());
    let platform = cli.platform.unwrap_or_else(|| config.platform());
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Init { output, force }) => cmd_init(&output, force, json_mode),
        Some(Commands::Show) | None => cmd_show(board.as_deref(), platform, json_mode),
        Some(Commands::Validate) => cmd_validate(board.as_deref(), json_mode),
        Some(Commands::Replay { script, save }) => {
            cmd_replay(board.as_deref(), platform, json_mode, &script, save)
        }
    }
}
