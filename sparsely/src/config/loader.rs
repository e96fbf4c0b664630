//! Configuration file discovery and loading.
//!
//! Git configuration is layered: system, XDG, global and local files are
//! read in that order and later layers override earlier ones.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::parser::{self, ConfigMap};
use crate::error::Result;
use crate::path::RepositoryLayout;
use crate::pattern::file::read_optional;

/// Overrides the system configuration path.
pub const CONFIG_SYSTEM_ENV: &str = "GIT_CONFIG_SYSTEM";
/// Skips the system configuration when truthy.
pub const CONFIG_NOSYSTEM_ENV: &str = "GIT_CONFIG_NOSYSTEM";
/// Overrides the global configuration path.
pub const CONFIG_GLOBAL_ENV: &str = "GIT_CONFIG_GLOBAL";
/// Base directory for XDG configuration.
pub const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

const DEFAULT_SYSTEM_CONFIG: &str = "/etc/gitconfig";

/// A configuration layer, ordered from lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLevel {
    /// Machine-wide configuration.
    System,
    /// `$XDG_CONFIG_HOME/git/config`.
    Xdg,
    /// Per-user configuration.
    Global,
    /// Per-repository configuration.
    Local,
}

impl ConfigLevel {
    /// Every level, lowest precedence first.
    pub const ALL: [Self; 4] = [Self::System, Self::Xdg, Self::Global, Self::Local];
}

impl fmt::Display for ConfigLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Xdg => write!(f, "xdg"),
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// A configuration file that was found and parsed.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// The layer the file belongs to.
    pub level: ConfigLevel,
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed entries.
    pub entries: ConfigMap,
}

/// Where each configuration layer is read from.
///
/// # Examples
///
/// ```
/// use sparsely::config::{ConfigLevel, ConfigLocations};
/// use std::path::Path;
///
/// let locations = ConfigLocations::none()
///     .with_global("/home/dev/.gitconfig")
///     .with_local("/repo/.git/config");
/// assert_eq!(locations.path(ConfigLevel::Global), Some(Path::new("/home/dev/.gitconfig")));
/// assert_eq!(locations.path(ConfigLevel::System), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLocations {
    system: Option<PathBuf>,
    xdg: Option<PathBuf>,
    global: Option<PathBuf>,
    local: Option<PathBuf>,
}

impl ConfigLocations {
    /// No configuration files at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// System, XDG and global locations from the environment and home directory.
    #[must_use]
    pub fn from_env() -> Self {
        let home = home::home_dir();

        let nosystem = env::var(CONFIG_NOSYSTEM_ENV)
            .ok()
            .and_then(|v| parser::parse_bool(&v))
            .unwrap_or(false);
        let system = if nosystem {
            None
        } else {
            Some(
                non_empty_env(CONFIG_SYSTEM_ENV)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_CONFIG)),
            )
        };

        let xdg = non_empty_env(XDG_CONFIG_HOME_ENV)
            .or_else(|| home.as_ref().map(|h| h.join(".config")))
            .map(|base| base.join("git").join("config"));

        let global =
            non_empty_env(CONFIG_GLOBAL_ENV).or_else(|| home.map(|h| h.join(".gitconfig")));

        Self {
            system,
            xdg,
            global,
            local: None,
        }
    }

    /// Locations from the environment plus the local file of the repository
    /// enclosing `start_dir`, if there is one.
    #[must_use]
    pub fn discover(start_dir: &Path) -> Self {
        let locations = Self::from_env();
        match RepositoryLayout::find(start_dir) {
            Some(layout) => locations.with_local(layout.local_config_file()),
            None => locations,
        }
    }

    /// Use `path` for the system layer.
    #[must_use]
    pub fn with_system(mut self, path: impl Into<PathBuf>) -> Self {
        self.system = Some(path.into());
        self
    }

    /// Use `path` for the XDG layer.
    #[must_use]
    pub fn with_xdg(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg = Some(path.into());
        self
    }

    /// Use `path` for the global layer.
    #[must_use]
    pub fn with_global(mut self, path: impl Into<PathBuf>) -> Self {
        self.global = Some(path.into());
        self
    }

    /// Use `path` for the local layer.
    #[must_use]
    pub fn with_local(mut self, path: impl Into<PathBuf>) -> Self {
        self.local = Some(path.into());
        self
    }

    /// The configured path for `level`.
    #[must_use]
    pub fn path(&self, level: ConfigLevel) -> Option<&Path> {
        match level {
            ConfigLevel::System => self.system.as_deref(),
            ConfigLevel::Xdg => self.xdg.as_deref(),
            ConfigLevel::Global => self.global.as_deref(),
            ConfigLevel::Local => self.local.as_deref(),
        }
    }
}

fn non_empty_env(name: &str) -> Option<PathBuf> {
    env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Loads configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load every configured layer that exists, lowest precedence first.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read.
    pub fn load_all(locations: &ConfigLocations) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();
        for level in ConfigLevel::ALL {
            let Some(path) = locations.path(level) else {
                continue;
            };
            if let Some(source) = Self::load_file(path, level)? {
                sources.push(source);
            }
        }
        Ok(sources)
    }

    /// Load and parse one configuration file. A missing file yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_file(path: &Path, level: ConfigLevel) -> Result<Option<ConfigSource>> {
        let Some(text) = read_optional(path)? else {
            log::trace!("no {level} config at {}", path.display());
            return Ok(None);
        };
        let entries = parser::parse(&text);
        log::debug!("loaded {} {level} entries from {}", entries.len(), path.display());
        Ok(Some(ConfigSource {
            level,
            path: path.to_path_buf(),
            entries,
        }))
    }
}
