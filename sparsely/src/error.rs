//! Error types for the sparsely library.
//!
//! This module provides the error hierarchy for all fallible operations in
//! the library, using `thiserror` for ergonomic error handling.
//!
//! Lookups that simply find nothing are not errors: they return `Ok(None)`.
//! An `Err` always means the call itself was invalid or the environment
//! failed underneath it.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a sparsely error.
///
/// # Examples
///
/// ```
/// use sparsely::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("core.sparsecheckout")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the sparsely library.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was empty or otherwise unusable.
    ///
    /// This signals a caller bug rather than a runtime condition.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The name of the offending argument.
        name: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },

    /// An invalid filesystem path was provided or could not be read.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No repository encloses the given directory.
    #[error("no repository found at or above {}", path.display())]
    RepositoryNotFound {
        /// The directory the search started from.
        path: PathBuf,
    },

    /// The repository was found but could not be opened.
    #[error("repository error: {details}")]
    Repository {
        /// Details reported by the repository backend.
        details: String,
    },

    /// The external executable could not be started.
    #[error("failed to launch {}: {source}", program.display())]
    CommandLaunch {
        /// The program that was launched.
        program: PathBuf,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The external executable ran but reported failure.
    #[error("{} {args} exited with {}", program.display(), match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    })]
    CommandFailed {
        /// The program that was run.
        program: PathBuf,
        /// The arguments, joined by spaces.
        args: String,
        /// The exit code, if the process exited normally.
        code: Option<i32>,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidArgument`] about an empty string.
    pub(crate) fn empty_argument(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "must not be empty".to_string(),
        }
    }

    /// Check if the error means no repository could be found.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::RepositoryNotFound { path: PathBuf::from("/tmp") };
    /// assert!(err.is_repository_not_found());
    /// ```
    #[must_use]
    pub fn is_repository_not_found(&self) -> bool {
        matches!(self, Self::RepositoryNotFound { .. })
    }

    /// Check if the error is a rejected argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
