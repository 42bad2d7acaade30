//! Global input hook via `rdev`.
//!
//! `rdev::listen` blocks its thread for the rest of the process and offers no
//! unregistration, so the hook runs on a dedicated `input-hook` thread and the
//! consumer gates delivery on its own shutdown flag. Events are passed through
//! untouched to other listeners.

use super::{InputEvent, InputEventKind, InputKey};
use crate::model::{MouseButton, PlatformError};
use rdev::{Button, EventType, Key};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// How long to wait for `rdev::listen` to fail before assuming it is running.
const STARTUP_GRACE: Duration = Duration::from_millis(250);

/// Install the global hook on a new thread and forward translated events.
///
/// `on_event` runs synchronously on the hook thread, in arrival order.
///
/// # Errors
///
/// Returns `PlatformError::InputHook` if the hook cannot be installed (no
/// display, missing permissions) or stops during startup, and
/// `PlatformError::ThreadSpawn` if the thread cannot be created.
pub fn spawn_input_hook<F>(mut on_event: F) -> Result<JoinHandle<()>, PlatformError>
where
    F: FnMut(InputEvent) + Send + 'static,
{
    let (err_tx, err_rx) = mpsc::channel::<PlatformError>();

    let handle = thread::Builder::new()
        .name("input-hook".to_string())
        .spawn(move || {
            let start = Instant::now();
            info!("Input hook listening");
            let result = rdev::listen(move |event| {
                if let Some(kind) = translate(&event.event_type) {
                    on_event(InputEvent {
                        kind,
                        timestamp_ms: start.elapsed().as_millis() as u64,
                    });
                }
            });
            if let Err(e) = result {
                error!(error = ?e, "Input hook stopped");
                let _ = err_tx.send(PlatformError::InputHook(format!("{e:?}")));
            }
        })
        .map_err(|e| PlatformError::ThreadSpawn {
            name: "input-hook",
            reason: e.to_string(),
        })?;

    match err_rx.recv_timeout(STARTUP_GRACE) {
        Ok(err) => Err(err),
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(handle),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(PlatformError::InputHook(
            "listener exited during startup".to_string(),
        )),
    }
}

/// Map an `rdev` event to the subset the dispatcher cares about.
fn translate(event_type: &EventType) -> Option<InputEventKind> {
    match event_type {
        EventType::ButtonRelease(Button::Left) => {
            Some(InputEventKind::ButtonUp(MouseButton::Primary))
        }
        EventType::ButtonRelease(_) => Some(InputEventKind::ButtonUp(MouseButton::Other)),
        EventType::KeyPress(key) => Some(InputEventKind::KeyDown(translate_key(key))),
        EventType::KeyRelease(key) => Some(InputEventKind::KeyUp(translate_key(key))),
        _ => None,
    }
}

fn translate_key(key: &Key) -> InputKey {
    match key {
        Key::Alt => InputKey::AltLeft,
        Key::AltGr => InputKey::AltRight,
        Key::ControlLeft => InputKey::ControlLeft,
        Key::ControlRight => InputKey::ControlRight,
        _ => InputKey::Other,
    }
}
