//! Main entry point for the sparsely CLI.
//!
//! This is the command-line interface for sparse-checkout management.
//! It provides commands for editing patterns and configuration:
//! - `list`: Show the current patterns
//! - `add` / `set`: Edit the pattern file
//! - `import`: Load patterns from a spec file
//! - `init` / `disable`: Toggle sparse checkout
//! - `config`: Query layered git configuration
//! - `check`: Exit non-zero when sparse checkout is off

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use sparsely::GitExecutable;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = sparsely::init_logger(cli.verbose, cli.quiet);
    logger.install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        logger,
        git: cli.git.map_or_else(GitExecutable::default, GitExecutable::new),
        dir: cli.dir,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Add(cmd) => cmd.execute(&global),
        cli::Command::Set(cmd) => cmd.execute(&global),
        cli::Command::Import(cmd) => cmd.execute(&global),
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Disable(cmd) => cmd.execute(&global),
        cli::Command::Config(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
