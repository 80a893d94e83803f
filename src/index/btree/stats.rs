//! Index statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by a tree.
///
/// All fields are atomic so `search`, which only borrows the tree shared,
/// can still count hits and misses.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
///
/// # Example
/// ```
/// use bptree::IndexStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = IndexStats::new();
/// stats.search_hits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.search_hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct IndexStats {
    /// Inserts that added a new key.
    pub inserts: AtomicU64,

    /// Inserts that overwrote the value of an existing key.
    pub updates: AtomicU64,

    /// Number of leaf splits.
    pub leaf_splits: AtomicU64,

    /// Number of internal node splits.
    pub internal_splits: AtomicU64,

    /// Number of times the root split and the tree grew a level.
    pub root_splits: AtomicU64,

    /// Searches that found their key.
    pub search_hits: AtomicU64,

    /// Searches that did not.
    pub search_misses: AtomicU64,
}

impl IndexStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            updates: AtomicU64::new(0),
            leaf_splits: AtomicU64::new(0),
            internal_splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
            search_hits: AtomicU64::new(0),
            search_misses: AtomicU64::new(0),
        }
    }

    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            leaf_splits: self.leaf_splits.load(Ordering::Relaxed),
            internal_splits: self.internal_splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            search_hits: self.search_hits.load(Ordering::Relaxed),
            search_misses: self.search_misses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.leaf_splits.store(0, Ordering::Relaxed);
        self.internal_splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
        self.search_hits.store(0, Ordering::Relaxed);
        self.search_misses.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`IndexStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub leaf_splits: u64,
    pub internal_splits: u64,
    pub root_splits: u64,
    pub search_hits: u64,
    pub search_misses: u64,
}

impl StatsSnapshot {
    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.search_hits + self.search_misses;
        if total == 0 {
            0.0
        } else {
            self.search_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, updates: {}, splits: {}/{} (leaf/internal), root splits: {}, hit_rate: {:.2}% }}",
            self.inserts,
            self.updates,
            self.leaf_splits,
            self.internal_splits,
            self.root_splits,
            self.hit_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = IndexStats::new();
        assert_eq!(stats.inserts.load(Ordering::Relaxed), 0);
        assert_eq!(stats.search_hits.load(Ordering::Relaxed), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_stats_hit_rate() {
        let stats = IndexStats::new();

        stats.search_hits.fetch_add(7, Ordering::Relaxed);
        stats.search_misses.fetch_add(3, Ordering::Relaxed);

        assert_eq!(stats.hit_rate(), 0.7);
    }

    #[test]
    fn test_stats_snapshot_and_reset() {
        let stats = IndexStats::new();
        IndexStats::bump(&stats.inserts);
        IndexStats::bump(&stats.inserts);
        IndexStats::bump(&stats.leaf_splits);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.inserts, 2);
        assert_eq!(snapshot.leaf_splits, 1);

        stats.reset();
        assert_eq!(stats.snapshot().inserts, 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = IndexStats::new();
        stats.inserts.fetch_add(20, Ordering::Relaxed);
        stats.leaf_splits.fetch_add(6, Ordering::Relaxed);
        stats.internal_splits.fetch_add(1, Ordering::Relaxed);
        stats.search_hits.fetch_add(8, Ordering::Relaxed);
        stats.search_misses.fetch_add(2, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("inserts: 20"));
        assert!(display.contains("splits: 6/1"));
        assert!(display.contains("80.00%"));
    }
}
