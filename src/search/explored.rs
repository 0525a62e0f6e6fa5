use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Set of states already generated during one search.
///
/// States are bucketed by hash and every lookup confirms equality against the
/// bucket, so two distinct states that share a hash are never conflated.
#[derive(Debug, Clone)]
pub struct ExploredSet<S, H = RandomState> {
    buckets: HashMap<u64, Vec<S>>,
    hasher: H,
    len: usize,
}

impl<S: Hash + Eq> ExploredSet<S> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<S: Hash + Eq> Default for ExploredSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Hash + Eq, H: BuildHasher> ExploredSet<S, H> {
    pub fn with_hasher(hasher: H) -> Self {
        ExploredSet {
            buckets: HashMap::new(),
            hasher,
            len: 0,
        }
    }

    pub fn exists(&self, state: &S) -> bool {
        self.buckets
            .get(&self.hasher.hash_one(state))
            .is_some_and(|bucket| bucket.contains(state))
    }

    /// Record `state`. Returns `false` if an equal state was already present.
    pub fn add(&mut self, state: S) -> bool {
        let bucket = self
            .buckets
            .entry(self.hasher.hash_one(&state))
            .or_default();
        if bucket.contains(&state) {
            return false;
        }
        bucket.push(state);
        self.len += 1;
        true
    }

    /// Number of distinct states recorded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
