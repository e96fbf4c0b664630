//! Reading and writing pattern lists.
//!
//! Two line-oriented formats are handled here:
//!
//! - the persisted pattern file, one pattern per line, written back as all
//!   inclusive patterns followed by all exclusive patterns;
//! - the spec file, an import format that mixes path patterns with
//!   `fetch=<refspec>` lines.

use std::fs;
use std::path::Path;

use regex::Regex;
use std::sync::LazyLock;

use super::classification::InsertMode;
use super::set::PatternSet;
use super::types::Pattern;
use crate::error::{Error, Result};

/// Byte order mark some editors write at the start of UTF-8 files.
const BOM: char = '\u{feff}';

static FETCH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^fetch\s*=\s*(.*)$").expect("valid fetch regex"));

/// Parse pattern-file text into patterns, one per line.
///
/// Every line becomes a [`Pattern`], including empty lines and comments; the
/// receiving [`PatternSet`] decides what it keeps.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::file::parse_patterns;
///
/// let patterns = parse_patterns("/*\n!/*/\n# generated\n");
/// assert_eq!(patterns.len(), 3);
/// assert!(patterns[1].is_exclusive());
/// assert!(patterns[2].is_comment());
/// ```
#[must_use]
pub fn parse_patterns(text: &str) -> Vec<Pattern> {
    strip_bom(text).lines().map(Pattern::parse).collect()
}

/// Read the pattern file at `path` into `set`.
///
/// A missing file contributes nothing. Returns the number of patterns the
/// set admitted.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_into(path: &Path, set: &mut PatternSet) -> Result<usize> {
    let Some(text) = read_optional(path)? else {
        log::debug!("no pattern file at {}", path.display());
        return Ok(0);
    };
    let (added, _) = set.add_many(parse_patterns(&text), InsertMode::Unrestricted);
    log::debug!("loaded {} pattern(s) from {}", added.len(), path.display());
    Ok(added.len())
}

/// Serialize the path patterns of `set`: inclusive first, then exclusive.
///
/// Comments and empty lines are not written.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::{file::serialize, InsertMode, Pattern, PatternSet};
///
/// let mut set = PatternSet::default();
/// set.add(Pattern::parse("!docs/drafts"), InsertMode::Unrestricted);
/// set.add(Pattern::parse("docs"), InsertMode::Unrestricted);
/// assert_eq!(serialize(&set), "docs\n!docs/drafts\n");
/// ```
#[must_use]
pub fn serialize(set: &PatternSet) -> String {
    let mut out = String::new();
    for pattern in set.inclusive().chain(set.exclusive()) {
        out.push_str(pattern.as_str());
        out.push('\n');
    }
    out
}

/// Write the path patterns of `set` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write(path: &Path, set: &PatternSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::InvalidPath {
            path: parent.to_path_buf(),
            reason: format!("Failed to create directory: {e}"),
        })?;
    }
    fs::write(path, serialize(set)).map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Failed to write pattern file: {e}"),
    })?;
    log::debug!("wrote {} pattern(s) to {}", set.len(), path.display());
    Ok(())
}

/// Contents of a spec file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecFile {
    /// Values of `fetch=` lines, in order.
    pub fetch: Vec<String>,
    /// Every other non-blank, non-comment line, in order.
    pub patterns: Vec<String>,
}

impl SpecFile {
    /// Parse spec-file text.
    ///
    /// Blank lines and lines starting with `#` or `;` are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::pattern::file::SpecFile;
    ///
    /// let spec = SpecFile::parse("; team layout\nFETCH = refs/heads/main\nsrc/\n\n!src/legacy\n");
    /// assert_eq!(spec.fetch, ["refs/heads/main"]);
    /// assert_eq!(spec.patterns, ["src/", "!src/legacy"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut spec = Self::default();
        for line in strip_bom(text).lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            match FETCH_LINE.captures(line) {
                Some(caps) => spec.fetch.push(caps[1].trim().to_string()),
                None => spec.patterns.push(line.to_string()),
            }
        }
        spec
    }

    /// Read and parse the spec file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read spec file: {e}"),
        })?;
        Ok(Self::parse(&decode(&bytes)))
    }
}

/// Read a text file, mapping "not found" to `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(decode(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read file: {e}"),
        }),
    }
}

/// Drop a leading byte order mark, which git also ignores.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

fn decode(bytes: &[u8]) -> String {
    strip_bom(&String::from_utf8_lossy(bytes)).to_string()
}
