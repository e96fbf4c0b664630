//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - A fresh repository per test in a temporary directory
//! - Command builders isolated from the machine's git configuration

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Test environment with an isolated repository and configuration.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Working tree of the test repository
    pub repo: PathBuf,
    /// Global configuration file used by every command
    pub global_config: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an initialized repository.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(&repo).expect("Failed to create repo dir");
        let global_config = temp_dir.path().join("gitconfig");
        fs::write(&global_config, "").expect("Failed to create global config");

        let env = Self {
            temp_dir,
            repo,
            global_config,
        };
        env.git(&["init", "--quiet"]);
        env
    }

    /// Get a command builder isolated from system and user configuration.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("sparsely").expect("Failed to find sparsely binary");
        self.isolate(&mut cmd);
        cmd.current_dir(&self.repo);
        cmd
    }

    /// Get a command builder running outside any repository.
    pub fn command_outside(&self) -> Command {
        let mut cmd = self.command();
        let outside = self.temp_dir.path().join("outside");
        fs::create_dir_all(&outside).expect("Failed to create outside dir");
        cmd.current_dir(outside);
        cmd
    }

    /// Run git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let mut cmd = StdCommand::new("git");
        cmd.args(args).current_dir(&self.repo);
        cmd.env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_CONFIG_GLOBAL", &self.global_config)
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("xdg"));
        let output = cmd.output().expect("Failed to execute git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// The repository's pattern file.
    pub fn pattern_file(&self) -> PathBuf {
        self.repo.join(".git").join("info").join("sparse-checkout")
    }

    /// Read the pattern file, empty if it does not exist.
    pub fn read_patterns(&self) -> String {
        fs::read_to_string(self.pattern_file()).unwrap_or_default()
    }

    /// Write a file relative to the temporary directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Get the repository path.
    pub fn path(&self) -> &Path {
        &self.repo
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_CONFIG_GLOBAL", &self.global_config)
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("xdg"))
            .env_remove("SPARSELY_GIT")
            .env_remove("SPARSELY_LOG_MODE")
            .env_remove("SPARSELY_OUTPUT_FORMAT");
    }
}
