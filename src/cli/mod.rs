// ABOUTME: CLI argument parsing and command routing for stepwise
//
// Provides command-line interface for:
// - Running the wizard (tui, default)
// - Inspecting or deleting saved progress (show, clear)
// - Listing configured steps and their rules (steps)

pub mod snapshot;
pub mod steps;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Multi-step wizard in the terminal
#[derive(Parser)]
#[command(name = "stepwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ~/.stepwise/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Allow jumping to any step regardless of progress
    #[arg(long, global = true)]
    pub allow_skip: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the wizard in the terminal (default if no command given)
    Tui,

    /// Print the saved progress snapshot
    Show,

    /// Delete the saved progress snapshot
    Clear,

    /// List configured steps and their validation rules
    Steps,
}
