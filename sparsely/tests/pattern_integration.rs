//! Integration tests for patterns, pattern sets and pattern files.

use std::fs;

use tempfile::TempDir;

use sparsely::path::canonicalize::canonicalize;
use sparsely::pattern::file::{self, SpecFile};
use sparsely::{AdmissionMask, InsertMode, Pattern, PatternSet, PrunePolicy};

#[test]
fn test_canonicalize_is_stable() {
    for raw in ["Docs/Guide", " #tag ", "a b/c%2Fd", r"\!bang", "100%"] {
        let once = canonicalize(raw);
        assert_eq!(canonicalize(&once), once, "input {raw:?}");
    }
}

#[test]
fn test_set_rejects_comments_unless_admitted() {
    let mut set = PatternSet::new(AdmissionMask::PATTERN);
    assert!(!set.add(Pattern::parse("# note"), InsertMode::Unrestricted));
    assert!(set.is_empty());

    let mut with_comments = PatternSet::new(AdmissionMask::COMMENT);
    assert!(with_comments.add(Pattern::parse("# note"), InsertMode::Unrestricted));
}

#[test]
fn test_frozen_set_is_unchanged() {
    let mut set = PatternSet::default();
    set.add(Pattern::parse("keep"), InsertMode::Unrestricted);
    set.freeze();

    assert!(!set.add(Pattern::parse("more"), InsertMode::Unrestricted));
    let (added, all) = set.add_many(vec![Pattern::parse("x")], InsertMode::Unrestricted);
    assert!(added.is_empty());
    assert!(!all);
    assert!(!set.clear());
    assert_eq!(set.as_slice(), [Pattern::parse("keep")]);
}

#[test]
fn test_broad_exclusion_prunes_narrow_ones() {
    let mut set = PatternSet::default();
    for line in ["/*", "!target/debug", "!target/release", "src"] {
        set.add(Pattern::parse(line), InsertMode::Unrestricted);
    }
    set.add(Pattern::parse("!target"), InsertMode::Unrestricted);

    let lines: Vec<&str> = set.iter().map(Pattern::as_str).collect();
    assert_eq!(lines, ["/*", "src", "!target"]);
}

#[test]
fn test_keep_existing_only_drops_newcomers() {
    let mut set = PatternSet::with_policy(AdmissionMask::PATTERN, PrunePolicy::KeepExisting);
    set.add(Pattern::parse("!target/debug"), InsertMode::Unrestricted);
    set.add(Pattern::parse("!target"), InsertMode::Unrestricted);
    set.add(Pattern::parse("!target/release"), InsertMode::Unrestricted);

    let lines: Vec<&str> = set.iter().map(Pattern::as_str).collect();
    assert_eq!(lines, ["!target/debug", "!target"]);
}

#[test]
fn test_pattern_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("info").join("sparse-checkout");

    let mut set = PatternSet::default();
    for line in ["!docs/internal", "docs", "!vendor", "crates/*/src"] {
        set.add(Pattern::parse(line), InsertMode::Unrestricted);
    }
    file::write(&path, &set).unwrap();

    let mut reread = PatternSet::default();
    file::load_into(&path, &mut reread).unwrap();

    let expected: Vec<&str> = set
        .inclusive()
        .chain(set.exclusive())
        .map(Pattern::as_str)
        .collect();
    let actual: Vec<&str> = reread.iter().map(Pattern::as_str).collect();
    assert_eq!(actual, expected);
    assert_eq!(actual, ["docs", "crates/*/src", "!docs/internal", "!vendor"]);
}

#[test]
fn test_spec_file_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("layout.spec");
    fs::write(
        &path,
        b"# services\nfetch = refs/heads/release/*\nservices/api\n!services/api/fixtures\n",
    )
    .unwrap();

    let spec = SpecFile::read(&path).unwrap();
    assert_eq!(spec.fetch, ["refs/heads/release/*"]);
    assert_eq!(spec.patterns, ["services/api", "!services/api/fixtures"]);
}

#[test]
fn test_invalid_utf8_is_read_lossily() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sparse-checkout");
    fs::write(&path, b"caf\xe9\nsrc\n").unwrap();

    let mut set = PatternSet::default();
    assert_eq!(file::load_into(&path, &mut set).unwrap(), 2);
    assert!(set.contains(&Pattern::parse("src")));
}
