//! Selection and scroll position over the capture log.
//!
//! The visible window is anchored at the newest entry: `scroll_offset` counts
//! lines hidden *below* the window, so 0 always shows the most recent
//! captures and new arrivals stay in view unless the user scrolled back.

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;

/// Scroll offset and selection derived from the store size and viewport height.
///
/// # Invariants
///
/// - `0 <= scroll_offset <= max(0, count - visible_height)` after every
///   operation that receives `count`
/// - `selected` is `None` or a valid index `< count`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    scroll_offset: usize,
    selected: Option<usize>,
    visible_height: usize,
}

impl NavigationState {
    /// Create navigation state for a viewport of `visible_height` rows.
    pub fn new(visible_height: usize) -> Self {
        Self {
            scroll_offset: 0,
            selected: None,
            visible_height,
        }
    }

    /// Lines hidden below the visible window.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Selected entry index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Rows available for log lines.
    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Update the viewport height (e.g. after a terminal resize).
    pub fn set_visible_height(&mut self, visible_height: usize) {
        self.visible_height = visible_height;
    }

    /// A new entry arrived: select it and show the newest window.
    pub fn on_append(&mut self, new_count: usize) {
        self.selected = new_count.checked_sub(1);
        self.scroll_offset = 0;
    }

    /// Move the selection towards older entries, scrolling to keep it visible.
    ///
    /// With no selection, selects the newest entry.
    pub fn move_up(&mut self, count: usize) {
        self.normalize_selection(count);
        self.selected = match self.selected {
            None => count.checked_sub(1),
            Some(index) => Some(index.saturating_sub(1)),
        };
        self.follow_selection(count);
    }

    /// Move the selection towards newer entries, scrolling to keep it visible.
    ///
    /// With no selection, selects the newest entry. Stops at `count - 1`.
    pub fn move_down(&mut self, count: usize) {
        self.normalize_selection(count);
        self.selected = match self.selected {
            None => count.checked_sub(1),
            Some(index) if index + 1 < count => Some(index + 1),
            Some(index) => Some(index),
        };
        self.follow_selection(count);
    }

    /// Reveal one older line. The selection is left where it is.
    pub fn scroll_up(&mut self, count: usize) {
        self.scroll_offset += 1;
        self.clamp_scroll(count, self.visible_height);
    }

    /// Reveal one newer line. The selection is left where it is.
    pub fn scroll_down(&mut self, count: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.clamp_scroll(count, self.visible_height);
    }

    /// Jump back to the newest entry.
    pub fn select_newest(&mut self, count: usize) {
        self.on_append(count);
    }

    /// Clamp `scroll_offset` into `[0, max(0, count - visible_height)]`.
    ///
    /// Called before every render. Also drops a selection that no longer
    /// points at an entry.
    pub fn clamp_scroll(&mut self, count: usize, visible_height: usize) {
        let max_scroll = count.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        self.normalize_selection(count);
    }

    /// Visible index range `(start, end_exclusive)` for `count` entries.
    pub fn visible_window(&self, count: usize, visible_height: usize) -> (usize, usize) {
        let max_scroll = count.saturating_sub(visible_height);
        let offset = self.scroll_offset.min(max_scroll);
        let start = count.saturating_sub(visible_height + offset);
        let end = count - offset;
        (start, end)
    }

    fn normalize_selection(&mut self, count: usize) {
        if self.selected.is_some_and(|index| index >= count) {
            self.selected = count.checked_sub(1);
        }
    }

    /// Adjust `scroll_offset` so the selection lies inside the visible window.
    fn follow_selection(&mut self, count: usize) {
        let height = self.visible_height;
        self.clamp_scroll(count, height);
        let Some(selected) = self.selected else {
            return;
        };
        if height == 0 {
            return;
        }

        let (start, end) = self.visible_window(count, height);
        if selected < start {
            // Scrolled above the visible top: push the window up.
            self.scroll_offset = count - height - selected;
        } else if selected >= end {
            // Below the visible bottom: pull the window down.
            self.scroll_offset = count - selected - 1;
        }
        self.clamp_scroll(count, height);
    }
}
