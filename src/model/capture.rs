//! Captured text entries and running statistics.

/// One captured clipboard text, as stored in the log.
///
/// Immutable after creation. The sequence number is assigned by the store,
/// increases monotonically and is never reused, even after eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    sequence: u64,
    text: String,
}

impl LogEntry {
    pub(crate) fn new(sequence: u64, text: String) -> Self {
        Self { sequence, text }
    }

    /// Store-assigned sequence number (starts at 1).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Stored (possibly truncated) text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the stored text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the stored text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Running totals over every capture since startup.
///
/// Only ever increases; updated in the same critical section that creates
/// the corresponding [`LogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    /// Number of captures recorded.
    pub total_captures: u64,
    /// Sum of stored (post-truncation) text lengths in bytes.
    pub total_chars: u64,
}

impl Statistics {
    /// Mean stored length, `0.0` before the first capture.
    pub fn average_len(&self) -> f64 {
        if self.total_captures == 0 {
            0.0
        } else {
            self.total_chars as f64 / self.total_captures as f64
        }
    }

    pub(crate) fn record(&mut self, stored_len: usize) {
        self.total_captures += 1;
        self.total_chars += stored_len as u64;
    }
}
