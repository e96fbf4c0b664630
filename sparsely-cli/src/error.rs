//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use sparsely::Error as LibError;
use std::fmt;
use std::path::PathBuf;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// No repository encloses the working directory.
    NotARepository(PathBuf),

    /// Configuration or git command error.
    Config(String),

    /// Output could not be produced.
    Output(String),

    /// Semantic failure (e.g., check failed) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (e.g., sparse checkout is off)
    /// - 3: No repository found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Output or other library error
    /// - 7: Configuration or git command error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::InvalidArgument { .. } => 4,
                LibError::Io(_) | LibError::InvalidPath { .. } => 5,
                LibError::CommandLaunch { .. } | LibError::CommandFailed { .. } => 7,
                _ => 6,
            },
            CliError::NotARepository(_) => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Output(_) => 6,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::NotARepository(path) => {
                write!(f, "Not inside a git repository: {}", path.display())
            }
            CliError::Output(msg) => write!(f, "Output error: {msg}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::RepositoryNotFound { path } => CliError::NotARepository(path),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_found: CliError = LibError::RepositoryNotFound {
            path: PathBuf::from("/tmp"),
        }
        .into();
        assert_eq!(not_found.exit_code(), 3);

        let failed: CliError = LibError::CommandFailed {
            program: PathBuf::from("git"),
            args: "config".to_string(),
            code: Some(1),
        }
        .into();
        assert_eq!(failed.exit_code(), 7);

        assert_eq!(CliError::SemanticFailure("off".into()).exit_code(), 1);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
        assert_eq!(CliError::Output("yaml".into()).exit_code(), 6);

        let unreadable: CliError = LibError::InvalidPath {
            path: PathBuf::from("layout.spec"),
            reason: "Failed to read spec file".to_string(),
        }
        .into();
        assert_eq!(unreadable.exit_code(), 5);
    }
}
