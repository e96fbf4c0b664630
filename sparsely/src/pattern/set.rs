//! Ordered, policy-enforcing collections of patterns.

use std::fmt;
use std::str::FromStr;

use super::classification::{AdmissionMask, Classification, InsertMode};
use super::subsumption::is_subsumed;
use super::types::Pattern;

/// How a [`PatternSet`] prunes redundant exclusive patterns after an insert.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::PrunePolicy;
///
/// assert_eq!("keep-existing".parse::<PrunePolicy>().unwrap(), PrunePolicy::KeepExisting);
/// assert_eq!(PrunePolicy::default(), PrunePolicy::KeepBroadest);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrunePolicy {
    /// Never prune.
    Disabled,
    /// Drop a new exclusive pattern that an existing one already covers.
    KeepExisting,
    /// As `KeepExisting`, and also drop existing exclusive patterns the new
    /// one covers.
    #[default]
    KeepBroadest,
}

impl fmt::Display for PrunePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::KeepExisting => write!(f, "keep-existing"),
            Self::KeepBroadest => write!(f, "keep-broadest"),
        }
    }
}

impl FromStr for PrunePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" | "none" => Ok(Self::Disabled),
            "keep-existing" => Ok(Self::KeepExisting),
            "keep-broadest" => Ok(Self::KeepBroadest),
            _ => Err(format!("invalid prune policy: {s}")),
        }
    }
}

/// An ordered list of patterns with admission rules.
///
/// The effective admission mask always contains both pattern kinds. Items
/// keep insertion order. After [`freeze`](Self::freeze) every structural
/// mutation reports `false` and leaves the list untouched.
///
/// Mutation goes through `&mut self`; wrap the set in a `Mutex` or `RwLock`
/// to share it between threads.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::{AdmissionMask, InsertMode, Pattern, PatternSet};
///
/// let mut set = PatternSet::new(AdmissionMask::NONE);
/// assert!(set.add(Pattern::parse("src"), InsertMode::Unrestricted));
/// assert!(!set.add(Pattern::parse("# note"), InsertMode::Unrestricted));
///
/// assert!(set.add_only_exclusive(Pattern::parse("!src/generated")));
/// assert_eq!(set.len(), 2);
///
/// set.freeze();
/// assert!(!set.clear());
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    admission: AdmissionMask,
    items: Vec<Pattern>,
    read_only: bool,
    policy: PrunePolicy,
}

impl PatternSet {
    /// Create an empty set admitting `admission` plus all patterns.
    #[must_use]
    pub fn new(admission: AdmissionMask) -> Self {
        Self::with_policy(admission, PrunePolicy::default())
    }

    /// Create an empty set with an explicit prune policy.
    #[must_use]
    pub fn with_policy(admission: AdmissionMask, policy: PrunePolicy) -> Self {
        Self {
            admission: admission | AdmissionMask::PATTERN,
            items: Vec::new(),
            read_only: false,
            policy,
        }
    }

    /// The effective admission mask.
    #[must_use]
    pub fn admission(&self) -> AdmissionMask {
        self.admission
    }

    /// The prune policy applied after inserts.
    #[must_use]
    pub fn policy(&self) -> PrunePolicy {
        self.policy
    }

    /// Whether the set has been frozen.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Make the set read-only. There is no way back.
    pub fn freeze(&mut self) {
        self.read_only = true;
    }

    /// Insert `item` at the end if the set and `mode` admit it.
    ///
    /// Returns `false` without touching the set when it is frozen, when the
    /// mask does not admit the item's classification, or when `mode` does
    /// not. An admitted item may still be pruned right away if the prune
    /// policy finds it redundant; that counts as success.
    pub fn add(&mut self, item: Pattern, mode: InsertMode) -> bool {
        if !self.admits(&item, mode) {
            log::trace!("rejected {:?} pattern {item}", item.classification());
            return false;
        }
        self.items.push(item);
        self.reconcile();
        true
    }

    /// Insert `item` only if it is an inclusive pattern.
    pub fn add_only_inclusive(&mut self, item: Pattern) -> bool {
        self.add(item, InsertMode::OnlyInclusive)
    }

    /// Insert `item` only if it is an exclusive pattern.
    pub fn add_only_exclusive(&mut self, item: Pattern) -> bool {
        self.add(item, InsertMode::OnlyExclusive)
    }

    /// Insert each item independently.
    ///
    /// Returns the admitted items and whether every item was admitted.
    pub fn add_many<I>(&mut self, items: I, mode: InsertMode) -> (Vec<Pattern>, bool)
    where
        I: IntoIterator<Item = Pattern>,
    {
        let mut added = Vec::new();
        let mut all = true;
        for item in items {
            if self.add(item.clone(), mode) {
                added.push(item);
            } else {
                all = false;
            }
        }
        (added, all)
    }

    /// Remove every item. Fails on a frozen set.
    pub fn clear(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        self.items.clear();
        true
    }

    /// Replace the contents with `items`, all-or-nothing on a frozen set.
    ///
    /// Returns the admitted items and whether every item was admitted.
    pub fn replace<I>(&mut self, items: I, mode: InsertMode) -> (Vec<Pattern>, bool)
    where
        I: IntoIterator<Item = Pattern>,
    {
        if !self.clear() {
            return (Vec::new(), false);
        }
        self.add_many(items, mode)
    }

    fn admits(&self, item: &Pattern, mode: InsertMode) -> bool {
        if self.read_only {
            return false;
        }
        let classification = item.classification();
        match classification {
            Classification::Comment | Classification::Empty
                if !self.admission.admits(classification) =>
            {
                false
            }
            _ => mode.permits(classification),
        }
    }

    /// Prune exclusive patterns made redundant by the newest item.
    fn reconcile(&mut self) {
        if self.policy == PrunePolicy::Disabled {
            return;
        }
        let Some(newest) = self.items.last() else {
            return;
        };
        if !newest.is_exclusive() {
            return;
        }
        let newest_index = self.items.len() - 1;

        let covered = self.items[..newest_index]
            .iter()
            .any(|existing| existing.is_exclusive() && is_subsumed(existing, newest));
        if covered {
            let dropped = self.items.pop();
            log::debug!("pruned redundant pattern {dropped:?}");
            return;
        }

        if self.policy == PrunePolicy::KeepBroadest {
            let newest = self.items[newest_index].clone();
            let before = self.items.len();
            let mut index = 0;
            self.items.retain(|existing| {
                let keep = index == newest_index
                    || !(existing.is_exclusive() && is_subsumed(&newest, existing));
                index += 1;
                keep
            });
            let removed = before - self.items.len();
            if removed > 0 {
                log::debug!("pattern {newest} superseded {removed} exclusive pattern(s)");
            }
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.items.iter()
    }

    /// Items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Pattern] {
        &self.items
    }

    /// Inclusive patterns in insertion order.
    pub fn inclusive(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.items.iter().filter(|p| p.is_inclusive())
    }

    /// Exclusive patterns in insertion order.
    pub fn exclusive(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.items.iter().filter(|p| p.is_exclusive())
    }

    /// Whether an item with the same line is present.
    #[must_use]
    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.items.iter().any(|p| p == pattern)
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new(AdmissionMask::PATTERN)
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
