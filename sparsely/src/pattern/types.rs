//! The [`Pattern`] value type.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::classification::{AdmissionMask, Classification, COMMENT_MARKER, EXCLUSION_MARKER};
use crate::path::canonicalize::ESCAPE;

/// Path separator used inside patterns.
pub const SEPARATOR: char = '/';

/// One line of a pattern file, canonicalized and classified.
///
/// A `Pattern` is immutable: the classification is computed once when the
/// value is built, and operations that change the leading marker return a
/// new value. Patterns are therefore `Send + Sync` and need no locking.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::{AdmissionMask, Classification, Pattern};
///
/// let p = Pattern::parse("  !build/  ");
/// assert_eq!(p.as_str(), "!build");
/// assert_eq!(p.classification(), Classification::Exclusive);
/// assert_eq!(p.pattern_text(), "build");
///
/// // A marker the caller does not admit is escaped into literal text.
/// let literal = Pattern::new("!build", AdmissionMask::INCLUSIVE);
/// assert_eq!(literal.as_str(), r"\!build");
/// assert!(literal.is_inclusive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern {
    text: String,
    classification: Classification,
}

impl Pattern {
    /// Build a pattern from raw input, canonicalizing it for `admission`.
    ///
    /// Canonicalization trims edge whitespace (keeping a trailing space that
    /// is escaped with `\`), escapes a leading `#` or `!` that `admission`
    /// does not allow, and strips trailing separators.
    #[must_use]
    pub fn new(raw: &str, admission: AdmissionMask) -> Self {
        let trimmed = trim_unescaped(raw);

        let mut text = String::with_capacity(trimmed.len() + 1);
        match trimmed.chars().next() {
            Some(COMMENT_MARKER) if !admission.admits(Classification::Comment) => {
                text.push(ESCAPE);
            }
            Some(EXCLUSION_MARKER) if !admission.admits(Classification::Exclusive) => {
                text.push(ESCAPE);
            }
            _ => {}
        }
        text.push_str(trimmed);

        let stripped_len = text.trim_end_matches(SEPARATOR).len();
        text.truncate(stripped_len);

        Self::from_buffer(text)
    }

    /// Build a pattern from a pattern-file line, honoring every marker.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::new(raw, AdmissionMask::ALL)
    }

    /// Build an exclusive pattern for `path`, adding the marker if missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::pattern::Pattern;
    ///
    /// assert_eq!(Pattern::exclusive("target/").as_str(), "!target");
    /// assert_eq!(Pattern::exclusive("!target").as_str(), "!target");
    /// ```
    #[must_use]
    pub fn exclusive(path: &str) -> Self {
        Self::new(path, AdmissionMask::PATTERN).with_exclusive(true)
    }

    /// Build an inclusive pattern for `path`; leading markers become literal.
    #[must_use]
    pub fn inclusive(path: &str) -> Self {
        Self::new(path, AdmissionMask::INCLUSIVE)
    }

    fn from_buffer(text: String) -> Self {
        let classification = Classification::of(&text);
        Self {
            text,
            classification,
        }
    }

    /// The canonical line, including any marker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the pattern, returning its canonical line.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// The classification computed at construction.
    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Whether the pattern is an empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classification == Classification::Empty
    }

    /// Whether the pattern is a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.classification == Classification::Comment
    }

    /// Whether the pattern is negated.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.classification == Classification::Exclusive
    }

    /// Whether the pattern is a plain inclusion.
    #[must_use]
    pub fn is_inclusive(&self) -> bool {
        self.classification == Classification::Inclusive
    }

    /// Whether the pattern matches paths at all.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        self.classification.is_pattern()
    }

    /// The path portion of the pattern.
    ///
    /// Exclusive patterns lose their marker, inclusive patterns are returned
    /// whole, and empty lines and comments yield `""`.
    #[must_use]
    pub fn pattern_text(&self) -> &str {
        match self.classification {
            Classification::Exclusive => &self.text[EXCLUSION_MARKER.len_utf8()..],
            Classification::Inclusive => &self.text,
            Classification::Empty | Classification::Comment => "",
        }
    }

    /// Return a copy with the comment marker added or removed.
    ///
    /// Empty patterns are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::pattern::Pattern;
    ///
    /// let p = Pattern::parse("docs");
    /// let commented = p.with_comment(true);
    /// assert_eq!(commented.as_str(), "#docs");
    /// assert!(commented.is_comment());
    /// assert_eq!(commented.with_comment(false), p);
    /// ```
    #[must_use]
    pub fn with_comment(&self, comment: bool) -> Self {
        self.with_marker(COMMENT_MARKER, Classification::Comment, comment)
    }

    /// Return a copy with the exclusion marker added or removed.
    ///
    /// Empty patterns are returned unchanged.
    #[must_use]
    pub fn with_exclusive(&self, exclusive: bool) -> Self {
        self.with_marker(EXCLUSION_MARKER, Classification::Exclusive, exclusive)
    }

    fn with_marker(&self, marker: char, marked: Classification, set: bool) -> Self {
        if self.is_empty() || (self.classification == marked) == set {
            return self.clone();
        }
        if set {
            let mut text = String::with_capacity(self.text.len() + 1);
            text.push(marker);
            text.push_str(&self.text);
            Self::from_buffer(text)
        } else {
            Self::from_buffer(self.text[marker.len_utf8()..].to_string())
        }
    }

    /// Compare raw lines ordinally, optionally ignoring case.
    ///
    /// On a common prefix the shorter line orders first.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::pattern::Pattern;
    /// use std::cmp::Ordering;
    ///
    /// let a = Pattern::parse("Src");
    /// let b = Pattern::parse("src");
    /// assert_eq!(a.compare(&b, false), Ordering::Less);
    /// assert_eq!(a.compare(&b, true), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self, ignore_case: bool) -> Ordering {
        compare(self, other, ignore_case)
    }

    /// Whether two patterns have equal lines, optionally ignoring case.
    #[must_use]
    pub fn equals(&self, other: &Self, ignore_case: bool) -> bool {
        compare(self, other, ignore_case) == Ordering::Equal
    }

    /// Whether every path matched by `other` is also matched by `self`.
    ///
    /// See [`is_subsumed`](super::is_subsumed).
    #[must_use]
    pub fn subsumes(&self, other: &Self) -> bool {
        super::subsumption::is_subsumed(self, other)
    }
}

/// Compare the raw lines of two patterns.
///
/// See [`Pattern::compare`].
#[must_use]
pub fn compare(a: &Pattern, b: &Pattern, ignore_case: bool) -> Ordering {
    if ignore_case {
        a.text
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.text.chars().flat_map(char::to_lowercase))
    } else {
        a.text.cmp(&b.text)
    }
}

impl PartialOrd for Pattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pattern {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other, false)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.text
    }
}

/// Trim whitespace, keeping trailing whitespace protected by an escape.
fn trim_unescaped(raw: &str) -> &str {
    let mut rest = raw.trim_start();
    while let Some(last) = rest.chars().next_back() {
        if !last.is_whitespace() {
            break;
        }
        let before = &rest[..rest.len() - last.len_utf8()];
        if before.ends_with(ESCAPE) {
            break;
        }
        rest = before;
    }
    rest
}
