//! Bounded cache of previously-scored positions keyed by Zobrist hash
//!
//! Entries are keyed by the 64-bit position hash alone; no further identity
//! check is performed, so two distinct positions that collide on the full
//! 64-bit key can corrupt a lookup. This is a known, accepted risk of the
//! design: verifying identity would cost memory and time and change move
//! choices in the (astronomically rare) collision cases.

use std::collections::HashMap;

/// How a stored score relates to the true score of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// the score fell strictly inside the search window
    Exact,
    /// the score met or exceeded beta (fail-high), a lower bound
    Lower,
    /// the score failed to exceed alpha (fail-low), an upper bound
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct Entry {
    /// remaining search depth when the score was computed
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
}

/// Entry count ceiling; the table is fully cleared rather than grow past it
pub const TABLE_MAX_ENTRIES: usize = 1 << 20;

pub struct TranspositionTable {
    entries: HashMap<u64, Entry>,
    max_entries: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_ceiling(TABLE_MAX_ENTRIES)
    }

    pub fn with_ceiling(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
        }
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        self.entries.get(&key).copied()
    }

    /// Stores an entry, overwriting any previous entry for the same hash
    ///
    /// If the table is at its ceiling and the key is new, the whole table is
    /// cleared first to bound memory.
    pub fn insert(&mut self, key: u64, entry: Entry) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.entries.clear();
        }
        self.entries.insert(key, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
