//! SortedSet implementation
//!
//! BTreeSet + HashMap dual index with RwLock for concurrency.

use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use ordered_float::OrderedFloat;
use parking_lot::RwLock;

use super::ZSetEntry;

type IndexKey = (OrderedFloat<f64>, Vec<u8>);

/// Both indexes, always mutated together under the set's write lock
#[derive(Default)]
struct Inner {
    /// Ordered by score, then member bytes
    index: BTreeSet<IndexKey>,

    /// member -> current score
    scores: HashMap<Vec<u8>, f64>,
}

impl Inner {
    fn insert(&mut self, score: f64, member: Vec<u8>) -> bool {
        let is_new = match self.scores.get(&member) {
            Some(&old) => {
                self.index.remove(&(OrderedFloat(old), member.clone()));
                false
            }
            None => true,
        };

        self.index.insert((OrderedFloat(score), member.clone()));
        self.scores.insert(member, score);
        is_new
    }
}

/// A sorted set of unique members ordered by score
///
/// ## Concurrency:
/// - Reads (`score`, `range`, `len`) share the read lock
/// - Writes (`add`, `increment`, `remove`) take the write lock, so no reader
///   ever sees the two indexes disagree
/// - All methods use `&self`
#[derive(Default)]
pub struct SortedSet {
    inner: RwLock<Inner>,
}

impl SortedSet {
    /// Create a new empty sorted set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member or move it to a new score
    ///
    /// Returns true if the member was not present before.
    /// NaN scores are accepted and sort after every other score; the
    /// dispatcher rejects them before they get here.
    pub fn add(&self, score: f64, member: impl Into<Vec<u8>>) -> bool {
        self.inner.write().insert(score, member.into())
    }

    /// Add `delta` to a member's score, starting from 0 if absent
    ///
    /// Returns the new score, or None (leaving the set untouched) when the
    /// sum is NaN, as with `inf + -inf`.
    pub fn increment(&self, delta: f64, member: impl Into<Vec<u8>>) -> Option<f64> {
        let member = member.into();
        let mut inner = self.inner.write();

        let score = inner.scores.get(&member).copied().unwrap_or(0.0) + delta;
        if score.is_nan() {
            return None;
        }
        inner.insert(score, member);
        Some(score)
    }

    /// Remove a member
    ///
    /// Returns false if the member was not present.
    pub fn remove(&self, member: &[u8]) -> bool {
        let mut inner = self.inner.write();

        let Some(score) = inner.scores.remove(member) else {
            return false;
        };
        inner.index.remove(&(OrderedFloat(score), member.to_vec()));
        true
    }

    /// Get a member's score
    pub fn score(&self, member: &[u8]) -> Option<f64> {
        self.inner.read().scores.get(member).copied()
    }

    /// All entries with `min <= score <= max`, ascending by score then member
    ///
    /// The scan starts at the probe `(min, "")`, which sorts before every
    /// real member scored `min`, and stops at the first score above `max`.
    pub fn range(&self, min: f64, max: f64) -> Vec<ZSetEntry> {
        if min > max {
            return Vec::new();
        }

        let inner = self.inner.read();
        let probe: IndexKey = (OrderedFloat(min), Vec::new());

        inner
            .index
            .range((Bound::Included(probe), Bound::Unbounded))
            .take_while(|(score, _)| score.0 <= max)
            .map(|(score, member)| ZSetEntry::new(score.0, member.clone()))
            .collect()
    }

    /// All entries in ascending order
    pub fn entries(&self) -> Vec<ZSetEntry> {
        self.inner
            .read()
            .index
            .iter()
            .map(|(score, member)| ZSetEntry::new(score.0, member.clone()))
            .collect()
    }

    /// Number of distinct members
    pub fn len(&self) -> usize {
        self.inner.read().scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
