//! Three-way partition of two key sets.
//!
//! Every diff in this crate starts by splitting the keys of a reference and a
//! candidate into "only on the left", "on both sides" and "only on the
//! right". The partition only looks at keys, so it works the same for section
//! tables or any other keyed collection.

use std::collections::HashSet;
use std::hash::Hash;

/// Result of [`classify`].
///
/// The three vectors are disjoint. Their order follows hash iteration order
/// and is unspecified; use [`Classification::sorted`] when the order is
/// observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<K> {
    /// Kept keys present only in the left set.
    pub left_only: Vec<K>,
    /// Kept keys present in both sets.
    pub common: Vec<K>,
    /// Kept keys present only in the right set.
    pub right_only: Vec<K>,
}

impl<K> Default for Classification<K> {
    fn default() -> Self {
        Self {
            left_only: Vec::new(),
            common: Vec::new(),
            right_only: Vec::new(),
        }
    }
}

impl<K: Ord> Classification<K> {
    /// Sorts all three parts in ascending order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.left_only.sort_unstable();
        self.common.sort_unstable();
        self.right_only.sort_unstable();
        self
    }
}

impl<K> Classification<K> {
    /// Returns `true` if both sets contained the same kept keys.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty()
    }
}

/// Partitions the keys of `left` and `right`.
///
/// `keep` is called for each key; a key it rejects is skipped and appears in
/// none of the outputs, while scanning continues with the next key. Repeated
/// keys within one input collapse into one.
///
/// # Examples
///
/// ```
/// use elfdiff_core::classify;
///
/// let parts = classify(["a", "b", "c"], ["b", "c", "d"], |_| true).sorted();
/// assert_eq!(parts.left_only, ["a"]);
/// assert_eq!(parts.common, ["b", "c"]);
/// assert_eq!(parts.right_only, ["d"]);
/// ```
pub fn classify<K, L, R, F>(left: L, right: R, mut keep: F) -> Classification<K>
where
    K: Eq + Hash,
    L: IntoIterator<Item = K>,
    R: IntoIterator<Item = K>,
    F: FnMut(&K) -> bool,
{
    let left: HashSet<K> = left.into_iter().filter(|k| keep(k)).collect();
    let mut right: HashSet<K> = right.into_iter().filter(|k| keep(k)).collect();

    let mut parts = Classification::default();
    for key in left {
        if right.remove(&key) {
            parts.common.push(key);
        } else {
            parts.left_only.push(key);
        }
    }
    parts.right_only.extend(right);
    parts
}
