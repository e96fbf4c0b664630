//! Discovery of the repository enclosing a directory.
//!
//! The sparse-checkout pattern file and the per-repository configuration
//! both live beneath the repository metadata directory. This module finds
//! that directory by walking upward from a starting point.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Location of the pattern file relative to the git directory.
pub const SPARSE_CHECKOUT_FILE: &str = "info/sparse-checkout";

/// Location of the local configuration file relative to the common directory.
pub const LOCAL_CONFIG_FILE: &str = "config";

/// Directories of a discovered repository.
///
/// For a linked worktree `git_dir` is the worktree's private metadata
/// directory while `common_dir` is the main repository's; otherwise the two
/// are the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    git_dir: PathBuf,
    common_dir: PathBuf,
    work_dir: Option<PathBuf>,
}

impl RepositoryLayout {
    /// Create a layout from known directories.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::path::RepositoryLayout;
    /// use std::path::Path;
    ///
    /// let layout = RepositoryLayout::new("/repo/.git", "/repo/.git", Some("/repo"));
    /// assert_eq!(layout.sparse_checkout_file(), Path::new("/repo/.git/info/sparse-checkout"));
    /// assert_eq!(layout.local_config_file(), Path::new("/repo/.git/config"));
    /// ```
    pub fn new(
        git_dir: impl Into<PathBuf>,
        common_dir: impl Into<PathBuf>,
        work_dir: Option<impl Into<PathBuf>>,
    ) -> Self {
        Self {
            git_dir: git_dir.into(),
            common_dir: common_dir.into(),
            work_dir: work_dir.map(Into::into),
        }
    }

    /// Locate the repository enclosing `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryNotFound`] if no repository encloses the
    /// directory, or [`Error::Repository`] if one is found but cannot be
    /// opened.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let (repo_path, _trust) = gix::discover::upwards(start_dir).map_err(|e| {
            log::debug!("repository discovery from {} failed: {e}", start_dir.display());
            Error::RepositoryNotFound {
                path: start_dir.to_path_buf(),
            }
        })?;
        let std_path: &Path = repo_path.as_ref();

        let repo = gix::open(std_path).map_err(|e| Error::Repository {
            details: format!("cannot open {}: {e}", std_path.display()),
        })?;

        // Linked worktrees report the common dir with `..` components.
        let common_dir = repo
            .common_dir()
            .canonicalize()
            .unwrap_or_else(|_| repo.common_dir().to_path_buf());

        let layout = Self {
            git_dir: repo.git_dir().to_path_buf(),
            common_dir,
            work_dir: repo.work_dir().map(Path::to_path_buf),
        };
        log::debug!("discovered repository at {}", layout.git_dir.display());
        Ok(layout)
    }

    /// Locate the repository enclosing `start_dir`, if any.
    #[must_use]
    pub fn find(start_dir: &Path) -> Option<Self> {
        Self::discover(start_dir).ok()
    }

    /// The metadata directory of this checkout.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// The metadata directory shared by all worktrees.
    #[must_use]
    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    /// The working tree, absent for bare repositories.
    #[must_use]
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Path of the persisted sparse-checkout pattern file.
    #[must_use]
    pub fn sparse_checkout_file(&self) -> PathBuf {
        self.git_dir.join(SPARSE_CHECKOUT_FILE)
    }

    /// Path of the per-repository configuration file.
    #[must_use]
    pub fn local_config_file(&self) -> PathBuf {
        self.common_dir.join(LOCAL_CONFIG_FILE)
    }
}
