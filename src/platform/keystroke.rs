//! Synthetic copy chord via `enigo`.

use super::KeystrokeInjector;
use crate::model::PlatformError;
use enigo::{
    Direction::{Click, Press, Release},
    Enigo, Key, Keyboard, Settings,
};

/// Sends Ctrl+C (Cmd+C on macOS) to the foreground application.
///
/// A new `Enigo` connection is opened per chord; the copy task is short-lived
/// and runs on its own thread.
#[derive(Debug, Default)]
pub struct EnigoInjector;

impl EnigoInjector {
    /// Create an injector.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "macos")]
const COPY_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const COPY_MODIFIER: Key = Key::Control;

impl KeystrokeInjector for EnigoInjector {
    fn send_copy_chord(&self) -> Result<(), PlatformError> {
        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| PlatformError::KeystrokeInjection(e.to_string()))?;

        enigo
            .key(COPY_MODIFIER, Press)
            .and_then(|_| enigo.key(Key::Unicode('c'), Click))
            .and_then(|_| enigo.key(COPY_MODIFIER, Release))
            .map_err(|e| PlatformError::KeystrokeInjection(e.to_string()))
    }
}
