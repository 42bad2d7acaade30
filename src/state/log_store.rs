//! Bounded log of captured texts.
//!
//! Oldest-first eviction, monotonic sequence numbers and silent truncation of
//! oversized texts.

use crate::model::{LogEntry, Statistics};
use std::collections::VecDeque;

#[cfg(test)]
#[path = "log_store_tests.rs"]
mod tests;

/// Ring buffer of captured entries with running statistics.
///
/// Entries are kept oldest at index 0, newest at `count() - 1`.
#[derive(Debug, Clone)]
pub struct LogStore {
    /// Entries (oldest at front, newest at back)
    entries: VecDeque<LogEntry>,
    /// Maximum entries to retain
    capacity: usize,
    /// Maximum stored bytes per entry
    max_line_bytes: usize,
    /// Sequence number handed to the next entry
    next_sequence: u64,
    statistics: Statistics,
}

impl LogStore {
    /// Create an empty store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries to retain (at least 1)
    /// * `max_line_bytes` - Hard cap on stored bytes per entry (at least 1)
    pub fn new(capacity: usize, max_line_bytes: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            max_line_bytes: max_line_bytes.max(1),
            next_sequence: 1,
            statistics: Statistics::default(),
        }
    }

    /// Record a new capture.
    ///
    /// Truncates `text` to `max_line_bytes`, evicts the oldest entry when the
    /// store is full, assigns the next sequence number and updates statistics
    /// with the stored length.
    pub fn append(&mut self, text: &str) -> &LogEntry {
        let stored = truncate_to_bytes(text, self.max_line_bytes);

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        let entry = LogEntry::new(self.next_sequence, stored.to_string());
        self.next_sequence += 1;
        self.statistics.record(entry.len());
        self.entries.push_back(entry);

        &self.entries[self.entries.len() - 1]
    }

    /// Entry at `index` (0 = oldest retained).
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Number of retained entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Per-entry byte cap.
    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Totals over every append since creation, including evicted entries.
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Retained entries, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

/// Longest prefix of `text` that fits in `max_bytes` and ends on a char boundary.
fn truncate_to_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
