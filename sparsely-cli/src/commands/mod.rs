//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `list`: Show the current patterns
//! - `add`: Add inclusive or exclusive patterns
//! - `set`: Replace every pattern
//! - `import`: Add the patterns of a spec file
//! - `init`: Turn sparse checkout on
//! - `disable`: Turn sparse checkout off
//! - `config`: Query layered git configuration
//! - `check`: Assert sparse checkout is on
//! - `completions`: Generate shell completion scripts

pub mod add;
pub mod check;
pub mod completions;
pub mod config;
pub mod disable;
pub mod import;
pub mod init;
pub mod list;
pub mod set;

pub use add::AddCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use config::ConfigCommand;
pub use disable::DisableCommand;
pub use import::ImportCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use set::SetCommand;
