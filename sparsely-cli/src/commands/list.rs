//! List command implementation.
//!
//! This module implements the `list` command, which displays the current
//! patterns in various formats (text, JSON, YAML).

use crate::error::CliError;
use crate::utils::{open_checkout, GlobalOptions};
use clap::{Args, ValueEnum};
use serde::Serialize;
use sparsely::{Classification, Pattern};
use std::io::Write;

/// Show the current sparse-checkout patterns.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "SPARSELY_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pattern per line
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

#[derive(Serialize)]
struct PatternRow<'a> {
    pattern: &'a str,
    kind: Classification,
}

impl<'a> From<&'a Pattern> for PatternRow<'a> {
    fn from(pattern: &'a Pattern) -> Self {
        Self {
            pattern: pattern.as_str(),
            kind: pattern.classification(),
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let checkout = open_checkout(global)?;
        let rows: Vec<PatternRow<'_>> = checkout.patterns().iter().map(PatternRow::from).collect();

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Text => {
                for row in &rows {
                    writeln!(handle, "{}", row.pattern)?;
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&rows)
                    .map_err(|e| CliError::Output(format!("JSON serialization failed: {e}")))?;
                writeln!(handle, "{json}")?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(&rows)
                    .map_err(|e| CliError::Output(format!("YAML serialization failed: {e}")))?;
                write!(handle, "{yaml}")?;
            }
        }

        Ok(())
    }
}
