//! Three-way split between two name-keyed mappings.

use std::collections::BTreeMap;

/// Result of [`diff_maps`]: three disjoint, name-ordered buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDiff<K: Ord, V> {
    /// Keys present on both sides with unequal values (source value kept)
    pub modified: BTreeMap<K, V>,
    /// Keys present only in the source (source value)
    pub only_in_source: BTreeMap<K, V>,
    /// Keys present only in the target (target value)
    pub only_in_target: BTreeMap<K, V>,
}

impl<K: Ord, V> MapDiff<K, V> {
    /// True when both sides were value-equal
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.only_in_source.is_empty() && self.only_in_target.is_empty()
    }

    /// Total entries across all three buckets
    pub fn len(&self) -> usize {
        self.modified.len() + self.only_in_source.len() + self.only_in_target.len()
    }
}

impl<K: Ord, V> Default for MapDiff<K, V> {
    fn default() -> Self {
        Self {
            modified: BTreeMap::new(),
            only_in_source: BTreeMap::new(),
            only_in_target: BTreeMap::new(),
        }
    }
}

/// Split `source` and `target` into modified / only-in-source / only-in-target.
///
/// Values are compared by `PartialEq`. Keys whose values are equal on both
/// sides appear in no bucket.
pub fn diff_maps<K, V>(source: &BTreeMap<K, V>, target: &BTreeMap<K, V>) -> MapDiff<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut out = MapDiff::default();

    for (key, source_value) in source {
        match target.get(key) {
            Some(target_value) if target_value == source_value => {}
            Some(_) => {
                out.modified.insert(key.clone(), source_value.clone());
            }
            None => {
                out.only_in_source.insert(key.clone(), source_value.clone());
            }
        }
    }

    for (key, target_value) in target {
        if !source.contains_key(key) {
            out.only_in_target.insert(key.clone(), target_value.clone());
        }
    }

    out
}
