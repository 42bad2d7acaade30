//! Input hook consumer: raw events in, gesture triggers out.

use super::CoordinationCore;
use crate::model::{ClickEvent, Decision, Modifiers};
use crate::platform::{InputEvent, InputEventKind, InputKey};
use crate::state::{GestureClassifier, GestureConfig};

/// Tracks which modifier keys are currently down.
///
/// Left and right keys are tracked separately so releasing one side does not
/// clear a modifier still held on the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierTracker {
    alt_left: bool,
    alt_right: bool,
    ctrl_left: bool,
    ctrl_right: bool,
}

impl ModifierTracker {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition.
    pub fn update(&mut self, key: InputKey, pressed: bool) {
        match key {
            InputKey::AltLeft => self.alt_left = pressed,
            InputKey::AltRight => self.alt_right = pressed,
            InputKey::ControlLeft => self.ctrl_left = pressed,
            InputKey::ControlRight => self.ctrl_right = pressed,
            InputKey::Other => {}
        }
    }

    /// Currently held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            alt: self.alt_left || self.alt_right,
            ctrl: self.ctrl_left || self.ctrl_right,
        }
    }
}

/// The single event producer. Lives on the input hook thread.
pub struct InputDispatcher {
    classifier: GestureClassifier,
    modifiers: ModifierTracker,
    core: CoordinationCore,
}

impl InputDispatcher {
    /// Dispatcher classifying with `config` and triggering on `core`.
    pub fn new(config: GestureConfig, core: CoordinationCore) -> Self {
        Self {
            classifier: GestureClassifier::new(config),
            modifiers: ModifierTracker::new(),
            core,
        }
    }

    /// Process one raw event in arrival order.
    ///
    /// After shutdown every event is ignored, since the hook itself cannot be
    /// unregistered.
    pub fn handle(&mut self, event: InputEvent) -> Decision {
        if self.core.is_shutting_down() {
            return Decision::None;
        }

        match event.kind {
            InputEventKind::KeyDown(key) => {
                self.modifiers.update(key, true);
                Decision::None
            }
            InputEventKind::KeyUp(key) => {
                self.modifiers.update(key, false);
                Decision::None
            }
            InputEventKind::ButtonUp(button) => {
                let click = ClickEvent {
                    timestamp_ms: event.timestamp_ms,
                    button,
                    modifiers: self.modifiers.modifiers(),
                };
                let decision = self.classifier.classify(click);
                // The task runs detached; its handle is not needed here.
                let _ = self.core.on_gesture_trigger(decision);
                decision
            }
        }
    }

    /// Modifiers as currently tracked.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers.modifiers()
    }

    /// Classifier state, for inspection.
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }
}
