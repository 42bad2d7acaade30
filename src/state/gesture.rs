//! Multi-click gesture classification (pure).
//!
//! Turns a stream of primary-button releases into trigger decisions using a
//! timing window between consecutive clicks and an optional modifier rule.

use crate::model::{ClickEvent, Decision, MouseButton};

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;

/// Fallback double-click interval when the platform value is unknown.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 500;

/// Platform double-click interval in milliseconds.
///
/// Used as the default upper bound of the timing window. There is no portable
/// query for this value, so the X11 default is used everywhere.
pub fn platform_double_click_ms() -> u64 {
    DEFAULT_DOUBLE_CLICK_MS
}

/// Rules deciding which click sequences are gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Clicks that complete the primary gesture (1, 2 or 3).
    pub required_clicks: u8,
    /// Primary gesture requires Alt held. Takes precedence over `require_ctrl`.
    pub require_alt: bool,
    /// Primary gesture requires Ctrl held.
    pub require_ctrl: bool,
    /// Ctrl + single click always triggers.
    pub allow_ctrl1: bool,
    /// Ctrl + double click always triggers.
    pub allow_ctrl2: bool,
    /// Smallest gap (ms) between clicks of one sequence.
    pub min_inter_click_ms: u64,
    /// Largest gap (ms) between clicks of one sequence.
    pub max_inter_click_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            required_clicks: 1,
            require_alt: false,
            require_ctrl: false,
            allow_ctrl1: false,
            allow_ctrl2: false,
            min_inter_click_ms: 0,
            max_inter_click_ms: platform_double_click_ms(),
        }
    }
}

/// Progress through the current click sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    /// Clicks counted in the current sequence; 0 after a trigger.
    pub click_count: u32,
    /// Timestamp of the previous primary click, `None` before the first one.
    pub last_click_time: Option<u64>,
}

/// Pure state machine classifying clicks.
///
/// Owned by the event producer; events must be fed in arrival order.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    state: GestureState,
}

impl GestureClassifier {
    /// Create a classifier with an empty sequence.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current sequence state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Classify one click and advance the sequence.
    ///
    /// A gap outside `[min_inter_click_ms, max_inter_click_ms]` restarts the
    /// sequence at this click (count 1) rather than discarding it. The first
    /// click ever, and a timestamp earlier than the previous one, count as
    /// violations. Primary and shortcut rules are evaluated independently;
    /// either is sufficient. When both hold the primary label is reported.
    /// Any trigger consumes the sequence (count back to 0).
    pub fn classify(&mut self, event: ClickEvent) -> Decision {
        if event.button != MouseButton::Primary {
            return Decision::None;
        }

        let in_window = self.state.last_click_time.is_some_and(|last| {
            event
                .timestamp_ms
                .checked_sub(last)
                .is_some_and(|diff| {
                    diff >= self.config.min_inter_click_ms && diff <= self.config.max_inter_click_ms
                })
        });

        if self.state.click_count > 0 && !in_window {
            self.state.click_count = 1;
        } else {
            self.state.click_count += 1;
        }
        self.state.last_click_time = Some(event.timestamp_ms);

        let count = self.state.click_count;
        let modifiers = event.modifiers;

        let modifier_ok = if self.config.require_alt {
            modifiers.alt
        } else if self.config.require_ctrl {
            modifiers.ctrl
        } else {
            true
        };
        let primary = modifier_ok && count == u32::from(self.config.required_clicks);

        let shortcut = modifiers.ctrl
            && ((self.config.allow_ctrl1 && count == 1) || (self.config.allow_ctrl2 && count == 2));

        let decision = if primary {
            Decision::PrimaryTrigger
        } else if shortcut {
            Decision::ShortcutTrigger
        } else {
            Decision::None
        };

        if decision.is_trigger() {
            self.state.click_count = 0;
        }

        decision
    }
}
