//! Config command implementation.
//!
//! Read-only queries against the merged system, XDG, global and local
//! configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::{Args, Subcommand};
use std::io::Write;

/// Query layered git configuration.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration queries.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the value of a key
    Get {
        /// Full key, such as `core.sparseCheckout`
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Resolve a key scoped to a URL or host, with fallbacks
    Lookup {
        /// Section name, such as `credential`
        #[arg(value_name = "PREFIX")]
        prefix: String,
        /// URL or host name
        #[arg(value_name = "TARGET")]
        target: String,
        /// Final key component
        #[arg(value_name = "SUFFIX")]
        suffix: String,
    },

    /// Print every merged entry as `key=value`
    List {
        /// Also print which files were read, as `#` comment lines
        #[arg(long)]
        show_sources: bool,
    },
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match self.action {
            ConfigAction::Get { key } => {
                let value = config.get(&key)?;
                print_found(&mut handle, &key, value)?;
            }
            ConfigAction::Lookup {
                prefix,
                target,
                suffix,
            } => {
                let value = config.get_hierarchical(&prefix, &target, &suffix)?;
                print_found(&mut handle, &format!("{prefix}.<{target}>.{suffix}"), value)?;
            }
            ConfigAction::List { show_sources } => {
                if show_sources {
                    for source in config.sources() {
                        writeln!(handle, "# {} {}", source.level, source.path.display())?;
                    }
                }
                for (key, value) in config.entries() {
                    writeln!(handle, "{key}={value}")?;
                }
            }
        }

        Ok(())
    }
}

fn print_found(out: &mut impl Write, what: &str, value: Option<&str>) -> Result<(), CliError> {
    match value {
        Some(value) => {
            writeln!(out, "{value}")?;
            Ok(())
        }
        None => Err(CliError::SemanticFailure(format!("{what} is not set"))),
    }
}
