#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # sparsely
//!
//! A library for managing sparse-checkout patterns and layered git
//! configuration.
//!
//! ## Core Types
//!
//! - [`Pattern`] and [`PatternSet`]: canonicalized pattern lines and ordered,
//!   self-pruning collections of them
//! - [`ConfigResolver`]: merged system, XDG, global and local configuration
//!   with host-scoped lookups
//! - [`SparseCheckout`]: a repository's pattern file and sparse-checkout flag
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use sparsely::{InsertMode, Pattern, PatternSet};
//!
//! let mut set = PatternSet::default();
//! set.add(Pattern::parse("crates/core/"), InsertMode::Unrestricted);
//! set.add(Pattern::parse("!crates/core/benches"), InsertMode::Unrestricted);
//!
//! assert_eq!(set.len(), 2);
//! assert!(Pattern::parse("crates").subsumes(&Pattern::parse("crates/core")));
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod operations;
pub mod path;
pub mod pattern;

// Re-export key types at crate root for convenience
pub use config::{ConfigLevel, ConfigLocations, ConfigResolver};
pub use error::{Error, Result};
pub use git::{GitExecutable, GitRunner, ProcessGitRunner};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::SparseCheckout;
pub use path::RepositoryLayout;
pub use pattern::{
    AdmissionMask, Classification, InsertMode, Pattern, PatternSet, PrunePolicy, SpecFile,
};
