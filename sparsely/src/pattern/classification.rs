//! Pattern classifications and admission masks.

use std::fmt;
use std::ops::BitOr;

use serde::Serialize;

/// Marker that turns a line into a comment.
pub const COMMENT_MARKER: char = '#';

/// Marker that negates a pattern.
pub const EXCLUSION_MARKER: char = '!';

/// The kind of line a [`Pattern`](super::Pattern) represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Nothing but whitespace or separators.
    Empty,
    /// A line starting with `#`.
    Comment,
    /// A negated pattern, starting with `!`.
    Exclusive,
    /// Any other pattern.
    Inclusive,
}

impl Classification {
    /// Classify a buffer by its first character.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsely::pattern::Classification;
    ///
    /// assert_eq!(Classification::of(""), Classification::Empty);
    /// assert_eq!(Classification::of("# note"), Classification::Comment);
    /// assert_eq!(Classification::of("!build"), Classification::Exclusive);
    /// assert_eq!(Classification::of("src"), Classification::Inclusive);
    /// assert_eq!(Classification::of(r"\#literal"), Classification::Inclusive);
    /// ```
    #[must_use]
    pub fn of(buffer: &str) -> Self {
        match buffer.chars().next() {
            None => Self::Empty,
            Some(COMMENT_MARKER) => Self::Comment,
            Some(EXCLUSION_MARKER) => Self::Exclusive,
            Some(_) => Self::Inclusive,
        }
    }

    /// Whether this classification is an actual path pattern.
    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Exclusive | Self::Inclusive)
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Empty => 0b0001,
            Self::Comment => 0b0010,
            Self::Exclusive => 0b0100,
            Self::Inclusive => 0b1000,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Comment => write!(f, "comment"),
            Self::Exclusive => write!(f, "exclusive"),
            Self::Inclusive => write!(f, "inclusive"),
        }
    }
}

/// A set of classifications a constructor or collection accepts.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::{AdmissionMask, Classification};
///
/// let mask = AdmissionMask::PATTERN | AdmissionMask::COMMENT;
/// assert!(mask.admits(Classification::Comment));
/// assert!(mask.admits(Classification::Exclusive));
/// assert!(!mask.admits(Classification::Empty));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdmissionMask(u8);

impl AdmissionMask {
    /// Admits nothing.
    pub const NONE: Self = Self(0);
    /// Empty lines.
    pub const EMPTY: Self = Self(Classification::Empty.bit());
    /// Comment lines.
    pub const COMMENT: Self = Self(Classification::Comment.bit());
    /// Negated patterns.
    pub const EXCLUSIVE: Self = Self(Classification::Exclusive.bit());
    /// Plain patterns.
    pub const INCLUSIVE: Self = Self(Classification::Inclusive.bit());
    /// Both kinds of path pattern.
    pub const PATTERN: Self = Self(Self::EXCLUSIVE.0 | Self::INCLUSIVE.0);
    /// Every classification.
    pub const ALL: Self = Self(Self::EMPTY.0 | Self::COMMENT.0 | Self::PATTERN.0);

    /// The union of two masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every classification in `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `classification` is admitted.
    #[must_use]
    pub const fn admits(self, classification: Classification) -> bool {
        self.0 & classification.bit() != 0
    }
}

impl Default for AdmissionMask {
    fn default() -> Self {
        Self::PATTERN
    }
}

impl BitOr for AdmissionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl From<Classification> for AdmissionMask {
    fn from(classification: Classification) -> Self {
        Self(classification.bit())
    }
}

/// Restriction applied by a single insert into a [`PatternSet`](super::PatternSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Anything the set's admission mask allows.
    #[default]
    Unrestricted,
    /// Only [`Classification::Inclusive`] patterns.
    OnlyInclusive,
    /// Only [`Classification::Exclusive`] patterns.
    OnlyExclusive,
}

impl InsertMode {
    /// Whether an item of `classification` satisfies this mode.
    #[must_use]
    pub const fn permits(self, classification: Classification) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::OnlyInclusive => matches!(classification, Classification::Inclusive),
            Self::OnlyExclusive => matches!(classification, Classification::Exclusive),
        }
    }
}
