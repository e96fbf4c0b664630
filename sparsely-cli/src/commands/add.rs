//! Add command implementation.

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::Args;
use sparsely::Pattern;

/// Add patterns to the pattern file.
#[derive(Args)]
pub struct AddCommand {
    /// Patterns to add
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Add the patterns as exclusions
    #[arg(long)]
    pub exclude: bool,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut checkout = open_checkout(global)?;
        let added = checkout.add(&self.patterns, self.exclude)?;

        for pattern in &added {
            global.logger.info(format!("added {pattern}"));
        }
        let empty = self
            .patterns
            .iter()
            .filter(|raw| {
                let pattern = if self.exclude {
                    Pattern::exclusive(raw)
                } else {
                    Pattern::inclusive(raw)
                };
                pattern.is_empty()
            })
            .count();
        let covered = self.patterns.len().saturating_sub(added.len() + empty);
        if empty > 0 {
            global.logger.warn(format!("{empty} pattern(s) were empty and not added"));
        }
        if covered > 0 {
            global
                .logger
                .warn(format!("{covered} pattern(s) were already covered and not added"));
        }
        Ok(())
    }
}
