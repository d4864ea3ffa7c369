//! Sorted Set Module
//!
//! Per-key ordered collection of (score, member) pairs.
//!
//! ## Responsibilities
//! - O(log n) insert/remove, O(1) score lookup
//! - O(log n + k) ascending range scans by score
//! - Multi-reader/single-writer access through one lock per set
//!
//! ## Data Structure Choice
//! Two indexes kept in lockstep under one RwLock:
//! - `BTreeSet<(score, member)>` for ordered traversal
//! - `HashMap<member, score>` for direct lookup
//!
//! The ordered index is keyed by the score, so a score is never changed
//! in place: an update removes the old pair and inserts the new one.

mod set;

pub use set::SortedSet;

/// One (score, member) pair as returned by range queries
#[derive(Debug, Clone, PartialEq)]
pub struct ZSetEntry {
    pub score: f64,
    pub member: Vec<u8>,
}

impl ZSetEntry {
    pub fn new(score: f64, member: impl Into<Vec<u8>>) -> Self {
        Self {
            score,
            member: member.into(),
        }
    }
}
