//! Path handling for sparse checkouts.
//!
//! Two concerns live here:
//!
//! - [`canonicalize`](canonicalize::canonicalize) produces a stable,
//!   lowercase, escaped and percent-encoded key for a path string.
//! - [`RepositoryLayout`] locates the repository that encloses a directory
//!   and knows where its pattern file and local configuration are stored.
//!
//! # Examples
//!
//! ```
//! use sparsely::path::canonicalize::canonicalize;
//!
//! assert_eq!(canonicalize(" Docs/Guide "), "docs/guide");
//! ```

pub mod canonicalize;
pub mod repository;

pub use repository::RepositoryLayout;
