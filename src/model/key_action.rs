//! Domain-level keyboard actions independent of key bindings.

/// Actions the navigation-input loop can request.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the selection one entry towards older captures. Default: ↑/k
    SelectPrevious,
    /// Move the selection one entry towards newer captures. Default: ↓/j
    SelectNext,
    /// Reveal one older line without moving the selection. Default: u/U
    ScrollUp,
    /// Reveal one newer line without moving the selection. Default: d/D
    ScrollDown,
    /// Jump back to the newest capture. Default: End/G
    SelectNewest,
    /// Export the selected entry to the system clipboard. Default: Ctrl+Enter/Ctrl+j/y
    CopySelected,
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether the action only touches navigation state.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            KeyAction::SelectPrevious
                | KeyAction::SelectNext
                | KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::SelectNewest
        )
    }
}
