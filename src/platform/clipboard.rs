//! Clipboard access via `arboard`.
//!
//! On X11/Wayland the clipboard is served by whoever owns the selection, so
//! [`ArboardOwner`] keeps its `arboard::Clipboard` alive for as long as it owns
//! the text; arboard's internal server thread answers paste requests.

use super::{ClipboardOwner, ClipboardReader};
use crate::model::PlatformError;
use arboard::Clipboard;
use tracing::debug;

/// Opens a fresh clipboard handle for every read.
#[derive(Debug, Default)]
pub struct ArboardReader;

impl ArboardReader {
    /// Create a reader.
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardReader for ArboardReader {
    fn read_text(&self) -> Result<Option<String>, PlatformError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| PlatformError::ClipboardUnavailable(e.to_string()))?;
        match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(PlatformError::ClipboardRead(e.to_string())),
        }
    }
}

/// Long-lived clipboard handle used to export selected log entries.
pub struct ArboardOwner {
    clipboard: Option<Clipboard>,
}

impl ArboardOwner {
    /// Open the clipboard session.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ClipboardUnavailable` when no display/session
    /// is reachable. This is a fatal startup error.
    pub fn open() -> Result<Self, PlatformError> {
        let clipboard =
            Clipboard::new().map_err(|e| PlatformError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self {
            clipboard: Some(clipboard),
        })
    }
}

impl ClipboardOwner for ArboardOwner {
    fn claim(&mut self, text: &str) -> Result<(), PlatformError> {
        let clipboard = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard,
            None => {
                return Err(PlatformError::ClipboardWrite(
                    "clipboard already released".to_string(),
                ))
            }
        };
        clipboard
            .set_text(text)
            .map_err(|e| PlatformError::ClipboardWrite(e.to_string()))
    }

    fn release(&mut self) {
        if self.clipboard.take().is_some() {
            debug!("Clipboard ownership released");
        }
    }
}

impl Drop for ArboardOwner {
    fn drop(&mut self) {
        self.release();
    }
}
