//! Init command implementation.

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::Args;

/// Turn sparse checkout on.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut checkout = open_checkout(global)?;
        if checkout.is_enabled() {
            global.logger.info("sparse checkout is already enabled");
        }
        checkout.enable()?;
        // Persist the file so it exists even with no patterns yet.
        checkout.save()?;
        global.logger.info("sparse checkout enabled");
        Ok(())
    }
}
