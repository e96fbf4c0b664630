//! Layered git configuration.
//!
//! Configuration is read from up to four files and merged with the
//! following precedence (highest to lowest):
//!
//! 1. Local repository config (`<common-dir>/config`)
//! 2. Global config (`$GIT_CONFIG_GLOBAL` or `~/.gitconfig`)
//! 3. XDG config (`$XDG_CONFIG_HOME/git/config` or `~/.config/git/config`)
//! 4. System config (`$GIT_CONFIG_SYSTEM` or `/etc/gitconfig`), skipped when
//!    `GIT_CONFIG_NOSYSTEM` is set
//!
//! Missing files are skipped.
//!
//! # Examples
//!
//! ```no_run
//! use sparsely::config::ConfigResolver;
//! use std::path::Path;
//!
//! let config = ConfigResolver::load(Path::new(".")).unwrap();
//! if config.is_sparse_checkout_enabled() {
//!     println!("sparse checkout is on");
//! }
//! ```
//!
//! Explicit locations, useful in tests:
//!
//! ```
//! use sparsely::config::{ConfigLocations, ConfigResolver};
//!
//! let config = ConfigResolver::from_locations(&ConfigLocations::none()).unwrap();
//! assert_eq!(config.get("core.editor").unwrap(), None);
//! ```

pub mod loader;
pub mod merger;
pub mod parser;
pub mod resolver;

pub use loader::{ConfigLevel, ConfigLoader, ConfigLocations, ConfigSource};
pub use merger::ConfigMerger;
pub use parser::{parse, parse_bool, ConfigMap};
pub use resolver::{ConfigResolver, PRUNE_POLICY_KEY, SPARSE_CHECKOUT_KEY};
