//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including directory resolution, configuration loading and opening the
//! repository's sparse-checkout state.

use crate::error::CliError;
use sparsely::{ConfigResolver, GitExecutable, Logger, ProcessGitRunner, SparseCheckout};
use std::env;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Logger configured from `--verbose`, `--quiet` and the environment.
    pub logger: Logger,

    /// The git executable to run.
    pub git: GitExecutable,

    /// Directory to start repository discovery from.
    pub dir: Option<PathBuf>,
}

/// The directory commands operate from, defaulting to the CWD.
pub fn resolve_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(env::current_dir()?),
    }
}

/// Load layered configuration visible from the working directory.
pub fn load_configuration(global: &GlobalOptions) -> Result<ConfigResolver, CliError> {
    let dir = resolve_dir(global)?;
    ConfigResolver::load(&dir).map_err(|e| CliError::Config(e.to_string()))
}

/// Open the sparse-checkout state of the enclosing repository.
pub fn open_checkout(global: &GlobalOptions) -> Result<SparseCheckout<ProcessGitRunner>, CliError> {
    let dir = resolve_dir(global)?;
    let runner = ProcessGitRunner::new(global.git.clone());
    let checkout = SparseCheckout::open(&dir, runner)?;
    global.logger.debug(format!(
        "using pattern file {}",
        checkout.layout().sparse_checkout_file().display()
    ));
    Ok(checkout)
}
