//! Repository-level operations.
//!
//! # Examples
//!
//! ```no_run
//! use sparsely::git::{GitExecutable, ProcessGitRunner};
//! use sparsely::operations::SparseCheckout;
//! use std::path::Path;
//!
//! let runner = ProcessGitRunner::new(GitExecutable::default());
//! let checkout = SparseCheckout::open(Path::new("."), runner).unwrap();
//! for pattern in checkout.patterns() {
//!     println!("{pattern}");
//! }
//! ```

pub mod sparse;

pub use sparse::SparseCheckout;
