//! Sparse-checkout patterns and pattern collections.
//!
//! A [`Pattern`] is one canonicalized line of a pattern file. A
//! [`PatternSet`] is an ordered collection with an admission policy that can
//! drop exclusion patterns made redundant by broader ones.
//!
//! # Examples
//!
//! ```
//! use sparsely::pattern::{InsertMode, Pattern, PatternSet};
//!
//! let mut set = PatternSet::default();
//! set.add(Pattern::parse("src"), InsertMode::Unrestricted);
//! set.add(Pattern::parse("!build/cache"), InsertMode::Unrestricted);
//! set.add(Pattern::parse("!build"), InsertMode::Unrestricted);
//!
//! let lines: Vec<&str> = set.iter().map(Pattern::as_str).collect();
//! assert_eq!(lines, ["src", "!build"]);
//! ```

pub mod classification;
pub mod file;
pub mod set;
pub mod subsumption;
mod types;

pub use classification::{AdmissionMask, Classification, InsertMode};
pub use file::SpecFile;
pub use set::{PatternSet, PrunePolicy};
pub use subsumption::is_subsumed;
pub use types::{compare, Pattern, SEPARATOR};
