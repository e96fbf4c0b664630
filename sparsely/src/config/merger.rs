//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::parser::ConfigMap;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use sparsely::config::{ConfigMap, ConfigMerger};
///
/// let mut merged = ConfigMap::new();
/// merged.insert("core.x".to_string(), "1".to_string());
///
/// let mut higher = ConfigMap::new();
/// higher.insert("core.x".to_string(), "2".to_string());
///
/// ConfigMerger::merge_into(&mut merged, &higher);
/// assert_eq!(merged["core.x"], "2");
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: &[ConfigSource]) -> ConfigMap {
        let mut result = ConfigMap::new();
        for source in sources {
            Self::merge_into(&mut result, &source.entries);
        }
        result
    }

    /// Merge `source` into `target`; every key in `source` wins.
    pub fn merge_into(target: &mut ConfigMap, source: &ConfigMap) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
}
