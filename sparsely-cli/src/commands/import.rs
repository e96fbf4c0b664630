//! Import command implementation.
//!
//! Reads a spec file, adds its path lines as patterns and prints its
//! `fetch=` refspecs, one per line.

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Add the patterns of a spec file.
#[derive(Args)]
pub struct ImportCommand {
    /// Spec file to read
    #[arg(value_name = "SPEC_FILE")]
    pub spec_file: PathBuf,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut checkout = open_checkout(global)?;
        let before = checkout.patterns().len();
        let fetch = checkout.import_spec_file(&self.spec_file)?;
        global.logger.info(format!(
            "imported {} pattern(s) from {}",
            checkout.patterns().len().saturating_sub(before),
            self.spec_file.display()
        ));

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for spec in &fetch {
            writeln!(handle, "{spec}")?;
        }
        Ok(())
    }
}
