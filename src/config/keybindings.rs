//! Keyboard bindings for the live log.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Key releases are ignored. Shift is dropped for character keys since the
    /// character already encodes it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        self.bindings.get(&(key.code, modifiers)).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert((code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Selection
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::SelectPrevious);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::SelectPrevious);
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::SelectNext);
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::SelectNext);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::SelectNewest);
        keys.bind(KeyCode::Char('G'), KeyModifiers::NONE, KeyAction::SelectNewest);

        // Scrolling
        keys.bind(KeyCode::Char('u'), KeyModifiers::NONE, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('U'), KeyModifiers::NONE, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::NONE, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('D'), KeyModifiers::NONE, KeyAction::ScrollDown);

        // Export. Terminals report Ctrl+Enter as Ctrl+J unless they use the
        // kitty keyboard protocol.
        keys.bind(KeyCode::Enter, KeyModifiers::CONTROL, KeyAction::CopySelected);
        keys.bind(KeyCode::Char('j'), KeyModifiers::CONTROL, KeyAction::CopySelected);
        keys.bind(KeyCode::Char('y'), KeyModifiers::NONE, KeyAction::CopySelected);

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
