//! SortedSet Tests
//!
//! Tests verify:
//! - Upsert semantics of add
//! - Remove and score lookup
//! - Inclusive range scans ordered by score then member
//! - Increment starting from zero
//! - Concurrent writers and readers

use std::sync::Arc;
use std::thread;

use rankkv::zset::{SortedSet, ZSetEntry};

fn members(entries: &[ZSetEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| String::from_utf8_lossy(&e.member).into_owned())
        .collect()
}

fn leaderboard() -> SortedSet {
    let set = SortedSet::new();
    set.add(1500.0, "player1");
    set.add(2000.0, "player2");
    set.add(1200.0, "player3");
    set
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_set_is_empty() {
    let set = SortedSet::new();
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert!(set.entries().is_empty());
}

#[test]
fn test_add_and_score() {
    let set = SortedSet::new();

    assert!(set.add(1.5, "a"));
    assert_eq!(set.score(b"a"), Some(1.5));
    assert_eq!(set.score(b"missing"), None);
}

#[test]
fn test_add_existing_member_updates_score() {
    let set = SortedSet::new();

    assert!(set.add(10.0, "a"));
    assert!(!set.add(5.0, "a"));
    assert!(!set.add(7.0, "a"));

    assert_eq!(set.len(), 1);
    assert_eq!(set.score(b"a"), Some(7.0));
    assert_eq!(set.entries(), vec![ZSetEntry::new(7.0, "a")]);
}

#[test]
fn test_updated_member_moves_in_order() {
    let set = leaderboard();
    set.add(100.0, "player2");

    assert_eq!(
        members(&set.entries()),
        vec!["player2", "player3", "player1"]
    );
}

#[test]
fn test_remove() {
    let set = leaderboard();

    assert!(set.remove(b"player3"));
    assert!(!set.remove(b"player3"));
    assert_eq!(set.score(b"player3"), None);
    assert_eq!(set.len(), 2);
    assert!(set.range(0.0, 5000.0).iter().all(|e| e.member != b"player3"));
}

#[test]
fn test_remove_missing_member() {
    let set = leaderboard();

    assert!(!set.remove(b"nobody"));
    assert_eq!(set.len(), 3);
}

#[test]
fn test_size_counts_distinct_members() {
    let set = SortedSet::new();
    for i in 0..10 {
        set.add(i as f64, format!("m{}", i % 4));
    }
    set.remove(b"m0");

    assert_eq!(set.len(), 3);
}

// =============================================================================
// Range Tests
// =============================================================================

#[test]
fn test_range_leaderboard() {
    let set = leaderboard();

    let entries = set.range(1000.0, 1800.0);
    assert_eq!(
        entries,
        vec![
            ZSetEntry::new(1200.0, "player3"),
            ZSetEntry::new(1500.0, "player1"),
        ]
    );
}

#[test]
fn test_range_bounds_are_inclusive() {
    let set = leaderboard();

    let entries = set.range(1200.0, 2000.0);
    assert_eq!(
        members(&entries),
        vec!["player3", "player1", "player2"]
    );
}

#[test]
fn test_range_ties_break_by_member() {
    let set = SortedSet::new();
    set.add(5.0, "charlie");
    set.add(5.0, "alpha");
    set.add(5.0, "bravo");
    set.add(4.0, "zulu");

    assert_eq!(
        members(&set.range(5.0, 5.0)),
        vec!["alpha", "bravo", "charlie"]
    );
}

#[test]
fn test_range_includes_empty_member_at_min() {
    let set = SortedSet::new();
    set.add(3.0, "");
    set.add(3.0, "a");

    assert_eq!(members(&set.range(3.0, 3.0)), vec!["", "a"]);
}

#[test]
fn test_range_empty_results() {
    let set = leaderboard();

    assert!(set.range(0.0, 1000.0).is_empty());
    assert!(set.range(2500.0, 3000.0).is_empty());
    assert!(set.range(1800.0, 1000.0).is_empty());
}

#[test]
fn test_range_infinite_bounds() {
    let set = leaderboard();
    set.add(f64::NEG_INFINITY, "floor");
    set.add(f64::INFINITY, "ceiling");

    let all = set.range(f64::NEG_INFINITY, f64::INFINITY);
    assert_eq!(all.len(), 5);
    assert_eq!(all.first().unwrap().member, b"floor");
    assert_eq!(all.last().unwrap().member, b"ceiling");
}

#[test]
fn test_range_negative_scores() {
    let set = SortedSet::new();
    set.add(-3.5, "a");
    set.add(-1.0, "b");
    set.add(0.0, "c");

    assert_eq!(members(&set.range(-2.0, 0.0)), vec!["b", "c"]);
}

#[test]
fn test_range_matches_filter_of_entries() {
    let set = SortedSet::new();
    for i in 0..200u32 {
        // Spread scores with plenty of ties
        set.add(((i * 37) % 50) as f64 / 2.0, format!("member{:03}", i));
    }

    for (lo, hi) in [(0.0, 5.0), (3.5, 3.5), (10.0, 24.5), (-1.0, 100.0)] {
        let expected: Vec<ZSetEntry> = set
            .entries()
            .into_iter()
            .filter(|e| e.score >= lo && e.score <= hi)
            .collect();
        assert_eq!(set.range(lo, hi), expected);
    }
}

#[test]
fn test_entries_are_sorted() {
    let set = SortedSet::new();
    for (score, member) in [(3.0, "c"), (1.0, "z"), (2.0, "b"), (1.0, "a")] {
        set.add(score, member);
    }

    let entries = set.entries();
    for pair in entries.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.score < b.score || (a.score == b.score && a.member < b.member));
    }
}

// =============================================================================
// Increment Tests
// =============================================================================

#[test]
fn test_increment_new_member_starts_at_zero() {
    let set = SortedSet::new();

    assert_eq!(set.increment(1000.0, "newplayer"), Some(1000.0));
    assert_eq!(set.score(b"newplayer"), Some(1000.0));
}

#[test]
fn test_increment_accumulates() {
    let set = leaderboard();

    assert_eq!(set.increment(250.0, "player1"), Some(1750.0));
    assert_eq!(set.increment(-100.0, "player2"), Some(1900.0));
    assert_eq!(
        members(&set.range(1700.0, 1950.0)),
        vec!["player1", "player2"]
    );
}

#[test]
fn test_increment_to_nan_leaves_set_untouched() {
    let set = SortedSet::new();
    set.add(f64::INFINITY, "a");

    assert_eq!(set.increment(f64::NEG_INFINITY, "a"), None);
    assert_eq!(set.score(b"a"), Some(f64::INFINITY));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_adds_of_distinct_members() {
    let set = Arc::new(SortedSet::new());
    let mut handles = vec![];

    for t in 0..8 {
        let set = Arc::clone(&set);
        handles.push(thread::spawn(move || {
            for i in 0..250 {
                set.add((t * 1000 + i) as f64, format!("t{}-m{}", t, i));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(set.len(), 2000);
    assert_eq!(set.range(f64::NEG_INFINITY, f64::INFINITY).len(), 2000);
}

#[test]
fn test_concurrent_increments_are_not_lost() {
    let set = Arc::new(SortedSet::new());
    let mut handles = vec![];

    for _ in 0..8 {
        let set = Arc::clone(&set);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                set.increment(1.0, "counter");
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(set.score(b"counter"), Some(800.0));
}

#[test]
fn test_readers_never_see_duplicate_members() {
    let set = Arc::new(SortedSet::new());
    for i in 0..20 {
        set.add(i as f64, format!("m{}", i));
    }

    let writer = {
        let set = Arc::clone(&set);
        thread::spawn(move || {
            for round in 0..200 {
                for i in 0..20 {
                    set.add(((i + round) % 37) as f64, format!("m{}", i));
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for _ in 0..200 {
                    let entries = set.range(f64::NEG_INFINITY, f64::INFINITY);
                    assert_eq!(entries.len(), 20);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(set.len(), 20);
}
