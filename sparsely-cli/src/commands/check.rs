//! Command to assert that sparse checkout is on.

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::Args;

/// Exit with status 1 unless sparse checkout is on.
#[derive(Args)]
pub struct CheckCommand {
    /// Invert the check (fail if sparse checkout is on)
    #[arg(long)]
    pub not: bool,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let checkout = open_checkout(global)?;
        let enabled = checkout.is_enabled();

        if enabled != self.not {
            global.logger.info(format!(
                "sparse checkout is {} ({} pattern(s))",
                if enabled { "enabled" } else { "disabled" },
                checkout.patterns().len()
            ));
            return Ok(());
        }

        let msg = if self.not {
            "Check failed: sparse checkout is enabled"
        } else {
            "Check failed: sparse checkout is not enabled"
        };
        Err(CliError::SemanticFailure(msg.to_string()))
    }
}
