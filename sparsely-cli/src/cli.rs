//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddCommand, CheckCommand, CompletionsCommand, ConfigCommand, DisableCommand, ImportCommand,
    InitCommand, ListCommand, SetCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing sparse-checkout patterns.
#[derive(Parser)]
#[command(name = "sparsely")]
#[command(version, about = "Manage sparse-checkout patterns", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Git executable to run
    #[arg(long, value_name = "PATH", global = true, env = "SPARSELY_GIT")]
    pub git: Option<PathBuf>,

    /// Start repository discovery from this directory instead of the CWD
    #[arg(short = 'C', long = "dir", value_name = "PATH", global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the current sparse-checkout patterns
    List(ListCommand),

    /// Add patterns to the pattern file
    Add(AddCommand),

    /// Replace every pattern in the pattern file
    Set(SetCommand),

    /// Add the patterns of a spec file
    Import(ImportCommand),

    /// Turn sparse checkout on
    Init(InitCommand),

    /// Turn sparse checkout off
    Disable(DisableCommand),

    /// Query layered git configuration
    Config(ConfigCommand),

    /// Exit with status 1 unless sparse checkout is on
    Check(CheckCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
