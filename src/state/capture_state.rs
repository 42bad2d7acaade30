//! Log store and navigation as one mutually consistent unit.
//!
//! Every mutation that depends on the entry count (append, selection moves,
//! scroll clamping) happens through this type, so a single lock around it is
//! enough to keep store and navigation in agreement.

use crate::model::{KeyAction, LogEntry, Statistics};
use crate::state::{LogStore, NavigationState};

/// Shared capture state: store, navigation and statistics.
#[derive(Debug, Clone)]
pub struct CaptureState {
    store: LogStore,
    navigation: NavigationState,
}

/// One rendered row of the log area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Index into the store (0 = oldest retained).
    pub index: usize,
    /// Store-assigned sequence number.
    pub sequence: u64,
    /// Stored text.
    pub text: String,
    /// Whether this row is the current selection.
    pub selected: bool,
}

/// Consistent copy of what the renderer needs, taken under the lock.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSnapshot {
    /// Rows of the visible window, oldest first.
    pub rows: Vec<VisibleRow>,
    /// Totals since startup.
    pub statistics: Statistics,
    /// Retained entry count.
    pub count: usize,
    /// Lines hidden below the window.
    pub scroll_offset: usize,
}

impl CaptureState {
    /// Create empty state with the given store limits and viewport height.
    pub fn new(max_lines: usize, max_line_bytes: usize, visible_height: usize) -> Self {
        Self {
            store: LogStore::new(max_lines, max_line_bytes),
            navigation: NavigationState::new(visible_height),
        }
    }

    /// Append a capture and move the selection to it.
    pub fn record_capture(&mut self, text: &str) -> LogEntry {
        let entry = self.store.append(text).clone();
        self.navigation.on_append(self.store.count());
        entry
    }

    /// Apply a navigation action. Returns `false` for non-navigation actions.
    pub fn apply_navigation(&mut self, action: KeyAction) -> bool {
        let count = self.store.count();
        match action {
            KeyAction::SelectPrevious => self.navigation.move_up(count),
            KeyAction::SelectNext => self.navigation.move_down(count),
            KeyAction::ScrollUp => self.navigation.scroll_up(count),
            KeyAction::ScrollDown => self.navigation.scroll_down(count),
            KeyAction::SelectNewest => self.navigation.select_newest(count),
            KeyAction::CopySelected | KeyAction::Quit => return false,
        }
        true
    }

    /// Update the viewport height and re-clamp scrolling.
    pub fn resize(&mut self, visible_height: usize) {
        self.navigation.set_visible_height(visible_height);
        self.navigation
            .clamp_scroll(self.store.count(), visible_height);
    }

    /// Text of the selected entry, if any.
    pub fn selected_text(&self) -> Option<String> {
        self.navigation
            .selected()
            .and_then(|index| self.store.get(index))
            .map(|entry| entry.text().to_string())
    }

    /// Clamp scrolling and copy out the visible window.
    pub fn snapshot(&mut self) -> CaptureSnapshot {
        let count = self.store.count();
        let height = self.navigation.visible_height();
        self.navigation.clamp_scroll(count, height);

        let (start, end) = self.navigation.visible_window(count, height);
        let selected = self.navigation.selected();
        let rows = (start..end)
            .filter_map(|index| {
                self.store.get(index).map(|entry| VisibleRow {
                    index,
                    sequence: entry.sequence(),
                    text: entry.text().to_string(),
                    selected: selected == Some(index),
                })
            })
            .collect();

        CaptureSnapshot {
            rows,
            statistics: self.store.statistics(),
            count,
            scroll_offset: self.navigation.scroll_offset(),
        }
    }

    /// Read access to the store.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Read access to navigation.
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Totals since startup.
    pub fn statistics(&self) -> Statistics {
        self.store.statistics()
    }
}
