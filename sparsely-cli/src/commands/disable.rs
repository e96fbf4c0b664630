//! Disable command implementation.

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::Args;

/// Turn sparse checkout off.
#[derive(Args)]
pub struct DisableCommand {}

impl DisableCommand {
    /// Execute the disable command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut checkout = open_checkout(global)?;
        checkout.disable()?;
        global.logger.info("sparse checkout disabled");
        Ok(())
    }
}
