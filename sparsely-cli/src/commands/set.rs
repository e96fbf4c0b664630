//! Set command implementation.

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::Args;

/// Replace every pattern in the pattern file.
#[derive(Args)]
pub struct SetCommand {
    /// Patterns to keep; a leading `!` excludes
    #[arg(value_name = "PATTERN", required = true, allow_hyphen_values = true)]
    pub patterns: Vec<String>,
}

impl SetCommand {
    /// Execute the set command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut checkout = open_checkout(global)?;
        let admitted = checkout.set(&self.patterns)?;
        global
            .logger
            .info(format!("pattern file now holds {} pattern(s)", admitted.len()));
        Ok(())
    }
}
