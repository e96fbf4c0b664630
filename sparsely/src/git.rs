//! Running the external `git` executable.
//!
//! Commands go through the [`GitRunner`] trait so workflows can be tested
//! without spawning processes. [`ProcessGitRunner`] runs the real
//! executable; [`MockGitRunner`] records invocations and replays canned
//! results.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Environment variable naming the executable to run.
pub const GIT_ENV: &str = "SPARSELY_GIT";

const DEFAULT_GIT: &str = "git";

/// Location of the git executable.
///
/// A bare name such as `git` is resolved through `PATH` by the OS when the
/// process is spawned.
///
/// # Examples
///
/// ```
/// use sparsely::git::GitExecutable;
/// use std::path::Path;
///
/// assert_eq!(GitExecutable::default().program(), Path::new("git"));
/// assert_eq!(GitExecutable::new("/usr/local/bin/git").program(), Path::new("/usr/local/bin/git"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitExecutable {
    program: PathBuf,
}

impl GitExecutable {
    /// Use the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `SPARSELY_GIT` when set and non-empty, else `git`.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var_os(GIT_ENV).filter(|v| !v.is_empty()) {
            Some(program) => Self::new(program),
            None => Self::default(),
        }
    }

    /// The program that will be spawned.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for GitExecutable {
    fn default() -> Self {
        Self::new(DEFAULT_GIT)
    }
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl GitOutput {
    /// A successful, silent run.
    #[must_use]
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    /// A run that exited with `code`.
    #[must_use]
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the run exited with status zero.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs git commands.
pub trait GitRunner: Send + Sync {
    /// The executable this runner invokes, used in error reports.
    fn executable(&self) -> &GitExecutable;

    /// Run git with `args` in `cwd` and capture the result.
    ///
    /// A non-zero exit is not an error at this level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandLaunch`] if the process cannot be started.
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput>;

    /// Run git and require a zero exit status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandLaunch`] if the process cannot be started, or
    /// [`Error::CommandFailed`] if it exits unsuccessfully.
    fn run_checked(&self, args: &[&str], cwd: &Path) -> Result<GitOutput> {
        let output = self.run(args, cwd)?;
        if output.is_success() {
            return Ok(output);
        }
        log::debug!("git {} failed: {}", args.join(" "), output.stderr.trim());
        Err(Error::CommandFailed {
            program: self.executable().program().to_path_buf(),
            args: args.join(" "),
            code: output.code,
        })
    }
}

/// Runs the real executable as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessGitRunner {
    executable: GitExecutable,
}

impl ProcessGitRunner {
    /// Create a runner for `executable`.
    #[must_use]
    pub fn new(executable: GitExecutable) -> Self {
        Self { executable }
    }
}

impl GitRunner for ProcessGitRunner {
    fn executable(&self) -> &GitExecutable {
        &self.executable
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput> {
        let program = self.executable.program();
        log::debug!("running {} {} in {}", program.display(), args.join(" "), cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| Error::CommandLaunch {
                program: program.to_path_buf(),
                source,
            })?;

        Ok(GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Test runner that records invocations and answers with a fixed result.
///
/// # Examples
///
/// ```
/// use sparsely::git::{GitOutput, GitRunner, MockGitRunner};
/// use std::path::Path;
///
/// let runner = MockGitRunner::new(GitOutput::failure(128, "fatal: not a git repository"));
/// assert!(runner.run_checked(&["status"], Path::new(".")).is_err());
/// assert_eq!(runner.calls(), [vec!["status".to_string()]]);
/// ```
#[derive(Debug, Default)]
pub struct MockGitRunner {
    executable: GitExecutable,
    response: GitOutput,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockGitRunner {
    /// Create a mock answering every call with `response`.
    #[must_use]
    pub fn new(response: GitOutput) -> Self {
        Self {
            executable: GitExecutable::default(),
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A mock whose every call succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::new(GitOutput::success())
    }

    /// Arguments of every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl GitRunner for MockGitRunner {
    fn executable(&self) -> &GitExecutable {
        &self.executable
    }

    fn run(&self, args: &[&str], _cwd: &Path) -> Result<GitOutput> {
        let call = args.iter().map(ToString::to_string).collect();
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_executable_from_env() {
        env::set_var(GIT_ENV, "/opt/git/bin/git");
        assert_eq!(GitExecutable::from_env().program(), Path::new("/opt/git/bin/git"));

        env::set_var(GIT_ENV, "");
        assert_eq!(GitExecutable::from_env(), GitExecutable::default());

        env::remove_var(GIT_ENV);
        assert_eq!(GitExecutable::from_env().program(), Path::new("git"));
    }

    #[test]
    fn test_output_status() {
        assert!(GitOutput::success().is_success());
        assert!(!GitOutput::failure(1, "").is_success());
        assert!(!GitOutput::default().is_success());
    }

    #[test]
    fn test_mock_records_calls() {
        let runner = MockGitRunner::succeeding();
        runner.run(&["config", "core.sparseCheckout", "true"], Path::new("/repo")).unwrap();
        runner.run(&["status"], Path::new("/repo")).unwrap();
        assert_eq!(runner.calls().len(), 2);
        assert_eq!(runner.calls()[0], ["config", "core.sparseCheckout", "true"]);
    }

    #[test]
    fn test_run_checked_reports_failure() {
        let runner = MockGitRunner::new(GitOutput::failure(3, "error: could not lock config file"));
        let err = runner.run_checked(&["config", "x", "y"], Path::new(".")).unwrap_err();
        match err {
            Error::CommandFailed { program, args, code } => {
                assert_eq!(program, Path::new("git"));
                assert_eq!(args, "config x y");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_executable_fails_to_launch() {
        let runner = ProcessGitRunner::new(GitExecutable::new("/nonexistent/bin/git-missing"));
        let err = runner.run(&["--version"], Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::CommandLaunch { .. }));
    }
}
