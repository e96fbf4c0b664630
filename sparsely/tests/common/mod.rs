//! Common test utilities for integration tests.
//!
//! Fixtures here build real repositories with the `git` executable and
//! configuration files in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use sparsely::config::{ConfigLevel, ConfigLocations};

/// Runs git in `path`, returning stderr on failure.
#[allow(dead_code)]
pub fn run_git(path: &Path, args: &[&str]) -> Result<(), String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .map_err(|e| format!("Failed to execute git: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(())
}

/// Creates an empty repository in a fresh temporary directory.
#[allow(dead_code)]
pub fn create_test_repo() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("failed to create temporary directory");
    run_git(temp_dir.path(), &["init", "--quiet"]).expect("git init failed");
    temp_dir
}

/// Configuration files for each layer, written into one temporary directory.
#[allow(dead_code)]
pub struct ConfigFixture {
    dir: TempDir,
    locations: ConfigLocations,
}

#[allow(dead_code)]
impl ConfigFixture {
    /// An empty fixture with no layers.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temporary directory"),
            locations: ConfigLocations::none(),
        }
    }

    /// Writes `text` as the file for `level`.
    pub fn with_layer(mut self, level: ConfigLevel, text: &str) -> Self {
        let path = self.path_for(level);
        fs::write(&path, text).expect("failed to write config layer");
        self.locations = match level {
            ConfigLevel::System => self.locations.with_system(path),
            ConfigLevel::Xdg => self.locations.with_xdg(path),
            ConfigLevel::Global => self.locations.with_global(path),
            ConfigLevel::Local => self.locations.with_local(path),
        };
        self
    }

    /// The path a layer's file is written to.
    pub fn path_for(&self, level: ConfigLevel) -> PathBuf {
        self.dir.path().join(format!("{level}.gitconfig"))
    }

    /// Locations pointing at every written layer.
    pub fn locations(&self) -> &ConfigLocations {
        &self.locations
    }
}
