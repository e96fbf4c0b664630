//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "sparsely";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        let hint = match self.shell {
            Shell::Bash => Some(
                "sparsely completions bash > ~/.local/share/bash-completion/completions/sparsely",
            ),
            Shell::Zsh => Some("sparsely completions zsh > ~/.zsh/completions/_sparsely"),
            Shell::Fish => {
                Some("sparsely completions fish > ~/.config/fish/completions/sparsely.fish")
            }
            Shell::PowerShell => {
                Some("sparsely completions powershell | Out-String | Invoke-Expression")
            }
            _ => None,
        };
        if let Some(hint) = hint {
            global.logger.info(format!("install with: {hint}"));
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
