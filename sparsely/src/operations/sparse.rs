//! Editing the sparse-checkout state of a repository.
//!
//! [`SparseCheckout`] ties a discovered repository to its layered
//! configuration and its persisted pattern file. Pattern edits are written
//! back immediately; enabling and disabling go through `git config` so the
//! repository's own tooling sees the change.

use std::path::Path;

use crate::config::{ConfigLocations, ConfigResolver, SPARSE_CHECKOUT_KEY};
use crate::error::Result;
use crate::git::GitRunner;
use crate::path::RepositoryLayout;
use crate::pattern::{file, AdmissionMask, InsertMode, Pattern, PatternSet, SpecFile};

/// A repository's sparse-checkout patterns and configuration.
///
/// # Examples
///
/// ```no_run
/// use sparsely::git::{GitExecutable, ProcessGitRunner};
/// use sparsely::operations::SparseCheckout;
/// use std::path::Path;
///
/// let runner = ProcessGitRunner::new(GitExecutable::from_env());
/// let mut checkout = SparseCheckout::open(Path::new("."), runner).unwrap();
/// checkout.add(["src", "docs"], false).unwrap();
/// checkout.add(["docs/drafts"], true).unwrap();
/// checkout.enable().unwrap();
/// ```
#[derive(Debug)]
pub struct SparseCheckout<R: GitRunner> {
    layout: RepositoryLayout,
    locations: ConfigLocations,
    config: ConfigResolver,
    patterns: PatternSet,
    runner: R,
}

impl<R: GitRunner> SparseCheckout<R> {
    /// Open the repository enclosing `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found, or if its configuration
    /// or pattern file exists but cannot be read.
    pub fn open(start_dir: &Path, runner: R) -> Result<Self> {
        let layout = RepositoryLayout::discover(start_dir)?;
        let locations = ConfigLocations::from_env().with_local(layout.local_config_file());
        Self::with_locations(layout, locations, runner)
    }

    /// Open a known repository with explicit configuration locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file or the pattern file exists
    /// but cannot be read.
    pub fn with_locations(
        layout: RepositoryLayout,
        locations: ConfigLocations,
        runner: R,
    ) -> Result<Self> {
        let config = ConfigResolver::from_locations(&locations)?;
        let mut patterns = PatternSet::with_policy(AdmissionMask::PATTERN, config.prune_policy());
        file::load_into(&layout.sparse_checkout_file(), &mut patterns)?;

        Ok(Self {
            layout,
            locations,
            config,
            patterns,
            runner,
        })
    }

    /// The repository directories.
    #[must_use]
    pub fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    /// The merged configuration as of the last load.
    #[must_use]
    pub fn config(&self) -> &ConfigResolver {
        &self.config
    }

    /// The current patterns.
    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The runner used for git commands.
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Add patterns and write the pattern file.
    ///
    /// With `exclude` every input becomes an exclusive pattern; otherwise a
    /// leading `!` is kept as literal text. Inputs already present, empty
    /// after canonicalization, or pruned as redundant are not returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file cannot be written.
    pub fn add<I, S>(&mut self, raw: I, exclude: bool) -> Result<Vec<Pattern>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = Vec::new();
        for item in raw {
            let pattern = if exclude {
                Pattern::exclusive(item.as_ref())
            } else {
                Pattern::inclusive(item.as_ref())
            };
            if self.patterns.contains(&pattern) {
                log::debug!("pattern {pattern} already present");
                continue;
            }
            let admitted = if exclude {
                self.patterns.add_only_exclusive(pattern.clone())
            } else {
                self.patterns.add_only_inclusive(pattern.clone())
            };
            if admitted && self.patterns.contains(&pattern) {
                added.push(pattern);
            }
        }
        self.save()?;
        Ok(added)
    }

    /// Replace every pattern and write the pattern file.
    ///
    /// Inputs are read as pattern-file lines, so `!` negates.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file cannot be written.
    pub fn set<I, S>(&mut self, raw: I) -> Result<Vec<Pattern>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed: Vec<Pattern> = raw.into_iter().map(|r| Pattern::parse(r.as_ref())).collect();
        let (admitted, _) = self.patterns.replace(parsed, InsertMode::Unrestricted);
        self.save()?;
        Ok(admitted
            .into_iter()
            .filter(|p| self.patterns.contains(p))
            .collect())
    }

    /// Import a spec file: its path lines are added as patterns.
    ///
    /// Returns the `fetch=` refspecs, which are not applied here.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file cannot be written.
    pub fn import_spec(&mut self, text: &str) -> Result<Vec<String>> {
        self.apply_spec(SpecFile::parse(text))
    }

    /// Import the spec file at `path`, as [`import_spec`](Self::import_spec).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`](crate::Error::InvalidPath) if the spec
    /// file cannot be read, or an error if the pattern file cannot be written.
    pub fn import_spec_file(&mut self, path: &Path) -> Result<Vec<String>> {
        self.apply_spec(SpecFile::read(path)?)
    }

    fn apply_spec(&mut self, spec: SpecFile) -> Result<Vec<String>> {
        let parsed = spec.patterns.iter().map(|line| Pattern::parse(line));
        let (admitted, _) = self.patterns.add_many(parsed, InsertMode::Unrestricted);
        log::debug!(
            "imported {} pattern(s) and {} fetch spec(s)",
            admitted.len(),
            spec.fetch.len()
        );
        self.save()?;
        Ok(spec.fetch)
    }

    /// Turn sparse checkout on through `git config`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or reports failure, or if the
    /// configuration cannot be reloaded afterwards.
    pub fn enable(&mut self) -> Result<()> {
        self.set_enabled(true)
    }

    /// Turn sparse checkout off through `git config`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or reports failure, or if the
    /// configuration cannot be reloaded afterwards.
    pub fn disable(&mut self) -> Result<()> {
        self.set_enabled(false)
    }

    /// Whether `core.sparseCheckout` is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_sparse_checkout_enabled()
    }

    /// Write the current patterns to the pattern file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        file::write(&self.layout.sparse_checkout_file(), &self.patterns)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let value = if enabled { "true" } else { "false" };
        let cwd = self.layout.work_dir().unwrap_or(self.layout.git_dir());
        self.runner.run_checked(&["config", SPARSE_CHECKOUT_KEY, value], cwd)?;
        self.config = ConfigResolver::from_locations(&self.locations)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::{GitOutput, MockGitRunner};
    use std::fs;
    use tempfile::TempDir;

    fn fixture(
        pattern_file: Option<&str>,
        local_config: Option<&str>,
    ) -> (TempDir, RepositoryLayout) {
        let temp_dir = TempDir::new().unwrap();
        let git_dir = temp_dir.path().join(".git");
        fs::create_dir_all(git_dir.join("info")).unwrap();
        if let Some(text) = pattern_file {
            fs::write(git_dir.join("info").join("sparse-checkout"), text).unwrap();
        }
        if let Some(text) = local_config {
            fs::write(git_dir.join("config"), text).unwrap();
        }
        let layout = RepositoryLayout::new(&git_dir, &git_dir, Some(temp_dir.path()));
        (temp_dir, layout)
    }

    fn open(layout: &RepositoryLayout, runner: MockGitRunner) -> SparseCheckout<MockGitRunner> {
        let locations = ConfigLocations::none().with_local(layout.local_config_file());
        SparseCheckout::with_locations(layout.clone(), locations, runner).unwrap()
    }

    fn lines(checkout: &SparseCheckout<MockGitRunner>) -> Vec<String> {
        checkout.patterns().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_open_reads_pattern_file() {
        let (_dir, layout) = fixture(Some("/*\n!/*/\nsrc\n"), None);
        let checkout = open(&layout, MockGitRunner::succeeding());
        assert_eq!(lines(&checkout), ["/*", "!/*", "src"]);
        assert!(!checkout.is_enabled());
    }

    #[test]
    fn test_open_without_pattern_file() {
        let (_dir, layout) = fixture(None, None);
        let checkout = open(&layout, MockGitRunner::succeeding());
        assert!(checkout.patterns().is_empty());
    }

    #[test]
    fn test_add_inclusive_and_exclusive() {
        let (_dir, layout) = fixture(None, None);
        let mut checkout = open(&layout, MockGitRunner::succeeding());

        let added = checkout.add(["src/", "docs"], false).unwrap();
        assert_eq!(added.len(), 2);
        let excluded = checkout.add(["docs/drafts"], true).unwrap();
        assert!(excluded[0].is_exclusive());

        let written = fs::read_to_string(layout.sparse_checkout_file()).unwrap();
        assert_eq!(written, "src\ndocs\n!docs/drafts\n");
    }

    #[test]
    fn test_add_skips_duplicates_and_redundant() {
        let (_dir, layout) = fixture(Some("src\n!build\n"), None);
        let mut checkout = open(&layout, MockGitRunner::succeeding());
        assert!(checkout.add(["src"], false).unwrap().is_empty());
        assert!(checkout.add(["build/cache"], true).unwrap().is_empty());
        assert_eq!(lines(&checkout), ["src", "!build"]);
    }

    #[test]
    fn test_add_inclusive_keeps_marker_literal() {
        let (_dir, layout) = fixture(None, None);
        let mut checkout = open(&layout, MockGitRunner::succeeding());
        let added = checkout.add(["!important"], false).unwrap();
        assert_eq!(added[0].as_str(), r"\!important");
        assert!(added[0].is_inclusive());
    }

    #[test]
    fn test_prune_policy_from_config() {
        let (_dir, layout) = fixture(
            Some("!logs/today\n"),
            Some("[sparsely]\n\tprunePolicy = disabled\n"),
        );
        let mut checkout = open(&layout, MockGitRunner::succeeding());
        checkout.add(["logs"], true).unwrap();
        assert_eq!(lines(&checkout), ["!logs/today", "!logs"]);
    }

    #[test]
    fn test_set_replaces() {
        let (_dir, layout) = fixture(Some("old\n!older\n"), None);
        let mut checkout = open(&layout, MockGitRunner::succeeding());
        let admitted = checkout.set(["!tmp", "new", "# dropped"]).unwrap();
        assert_eq!(admitted.len(), 2);
        assert_eq!(
            fs::read_to_string(layout.sparse_checkout_file()).unwrap(),
            "new\n!tmp\n"
        );
    }

    #[test]
    fn test_import_spec_returns_fetch() {
        let (_dir, layout) = fixture(None, None);
        let mut checkout = open(&layout, MockGitRunner::succeeding());
        let fetch = checkout
            .import_spec(
                "; layout\nfetch=+refs/heads/main:refs/remotes/origin/main\nlib/\n!lib/test\n",
            )
            .unwrap();
        assert_eq!(fetch, ["+refs/heads/main:refs/remotes/origin/main"]);
        assert_eq!(lines(&checkout), ["lib", "!lib/test"]);
    }

    #[test]
    fn test_import_spec_file() {
        let (dir, layout) = fixture(Some("docs\n"), None);
        let spec_path = dir.path().join("layout.spec");
        fs::write(&spec_path, "\u{feff}fetch = refs/heads/main\nsrc/\n").unwrap();

        let mut checkout = open(&layout, MockGitRunner::succeeding());
        let fetch = checkout.import_spec_file(&spec_path).unwrap();
        assert_eq!(fetch, ["refs/heads/main"]);
        assert_eq!(lines(&checkout), ["docs", "src"]);

        let err = checkout.import_spec_file(&dir.path().join("absent.spec")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_enable_runs_git_config_and_reloads() {
        let (_dir, layout) = fixture(None, None);
        let mut checkout = open(&layout, MockGitRunner::succeeding());
        // The mock does not touch disk, so write what git would have.
        fs::write(layout.local_config_file(), "[core]\nsparsecheckout = true\n").unwrap();

        checkout.enable().unwrap();
        assert!(checkout.is_enabled());
        assert_eq!(
            checkout.runner().calls(),
            [vec!["config".to_string(), SPARSE_CHECKOUT_KEY.to_string(), "true".to_string()]]
        );
    }

    #[test]
    fn test_disable_failure_is_reported() {
        let (_dir, layout) = fixture(None, Some("[core]\nsparseCheckout = true\n"));
        let mut checkout = open(&layout, MockGitRunner::new(GitOutput::failure(255, "locked")));
        let err = checkout.disable().unwrap_err();
        assert!(matches!(err, Error::CommandFailed { code: Some(255), .. }));
        assert!(checkout.is_enabled());
    }
}
