//! Platform collaborators behind capability traits.
//!
//! The coordination core only sees the traits below; the concrete
//! implementations wrap `rdev` (global input hook), `arboard` (clipboard read
//! and ownership) and `enigo` (synthetic copy chord). Tests substitute
//! recording fakes.

pub mod clipboard;
pub mod input_hook;
pub mod keystroke;

pub use clipboard::{ArboardOwner, ArboardReader};
pub use input_hook::spawn_input_hook;
pub use keystroke::EnigoInjector;

use crate::model::{MouseButton, PlatformError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Keys the input hook reports. Only modifiers matter to gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Left Alt.
    AltLeft,
    /// Right Alt / AltGr.
    AltRight,
    /// Left Control.
    ControlLeft,
    /// Right Control.
    ControlRight,
    /// Anything else.
    Other,
}

/// What happened on the global input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEventKind {
    /// A mouse button was released.
    ButtonUp(MouseButton),
    /// A key went down.
    KeyDown(InputKey),
    /// A key went up.
    KeyUp(InputKey),
}

/// One event delivered by the input hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Event kind.
    pub kind: InputEventKind,
    /// Milliseconds on a monotonic clock started with the hook.
    pub timestamp_ms: u64,
}

/// Reads the current clipboard text.
pub trait ClipboardReader: Send + Sync {
    /// `Ok(None)` when the clipboard holds no text.
    fn read_text(&self) -> Result<Option<String>, PlatformError>;
}

/// Sends the foreground application's copy shortcut.
pub trait KeystrokeInjector: Send + Sync {
    /// Press and release the platform copy chord (Ctrl+C / Cmd+C).
    fn send_copy_chord(&self) -> Result<(), PlatformError>;
}

/// Holds clipboard ownership and answers paste requests while claimed.
///
/// Owned by exactly one long-lived responder task.
pub trait ClipboardOwner: Send {
    /// Become the clipboard owner serving `text`.
    fn claim(&mut self, text: &str) -> Result<(), PlatformError>;

    /// Give up ownership and tear down the underlying handle.
    fn release(&mut self);
}

/// Tells whether the foreground window belongs to this process.
///
/// Gestures performed on our own window must not inject a copy chord.
pub trait ForegroundProbe: Send + Sync {
    /// `true` when the focused window is this process' terminal.
    fn foreground_is_self(&self) -> bool;
}

/// Foreground probe fed by terminal focus events.
///
/// The TUI loop flips it on `FocusGained`/`FocusLost`. Terminals only report
/// changes, so the initial state has to be supplied by whoever launches.
#[derive(Debug, Clone, Default)]
pub struct TerminalFocus {
    focused: Arc<AtomicBool>,
}

impl TerminalFocus {
    /// Create a probe in the unfocused state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe in the focused state, for a terminal known to be in front.
    pub fn focused() -> Self {
        let focus = Self::new();
        focus.set_focused(true);
        focus
    }

    /// Record a focus change of the terminal.
    pub fn set_focused(&self, focused: bool) {
        self.focused.store(focused, Ordering::SeqCst);
    }
}

impl ForegroundProbe for TerminalFocus {
    fn foreground_is_self(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_focus_starts_unfocused() {
        assert!(!TerminalFocus::new().foreground_is_self());
    }

    #[test]
    fn focused_terminal_blocks_until_focus_lost() {
        let focus = TerminalFocus::focused();
        assert!(focus.foreground_is_self());

        focus.set_focused(false);
        assert!(!focus.foreground_is_self());
    }

    #[test]
    fn terminal_focus_clones_share_state() {
        let focus = TerminalFocus::new();
        let probe = focus.clone();

        focus.set_focused(true);
        assert!(probe.foreground_is_self());

        focus.set_focused(false);
        assert!(!probe.foreground_is_self());
    }
}
