//! Step-to-step bookkeeping of touching pairs.
//!
//! The world records every pair reported during a step with
//! [`OverlapKeeper::set`], then asks for the [`OverlapKeeper::diff`] against
//! the previous step to find out which pairs started and which stopped
//! touching. [`OverlapKeeper::tick`] moves the current set into the previous
//! slot before the next step starts recording.
//!
//! Keys are stored with the lower id first, so `(a, b)` and `(b, a)` are the
//! same pair. The payload of the first `set` call for a pair wins.

use rustc_hash::FxHashMap;

/// Current and previous sets of touching pairs, keyed by id.
#[derive(Debug, Clone)]
pub struct OverlapKeeper<K, T> {
    current: FxHashMap<(K, K), T>,
    previous: FxHashMap<(K, K), T>,
}

impl<K, T> Default for OverlapKeeper<K, T> {
    fn default() -> Self {
        Self {
            current: FxHashMap::default(),
            previous: FxHashMap::default(),
        }
    }
}

impl<K, T> OverlapKeeper<K, T>
where
    K: Copy + Ord + std::hash::Hash,
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn key(i: K, j: K) -> (K, K) {
        if i <= j { (i, j) } else { (j, i) }
    }

    /// Record that `i` and `j` touch in the current step.
    pub fn set(&mut self, i: K, j: K, value: T) {
        self.current.entry(Self::key(i, j)).or_insert(value);
    }

    /// Make the current pairs the previous ones and start an empty step.
    pub fn tick(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
    }

    /// Pairs added and removed since the previous step, each sorted by key.
    pub fn diff(&self) -> (Vec<T>, Vec<T>) {
        let additions = Self::missing_from(&self.current, &self.previous);
        let removals = Self::missing_from(&self.previous, &self.current);
        (additions, removals)
    }

    fn missing_from(from: &FxHashMap<(K, K), T>, other: &FxHashMap<(K, K), T>) -> Vec<T> {
        let mut keys: Vec<&(K, K)> = from.keys().filter(|k| !other.contains_key(*k)).collect();
        keys.sort_unstable();
        keys.into_iter().map(|k| from[k].clone()).collect()
    }
}
