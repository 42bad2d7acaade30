//! Concurrency glue between the capture path and the navigation path.
//!
//! Actors:
//! - the input hook thread, feeding [`InputDispatcher`]
//! - one short-lived `copy-task` thread per trigger
//! - the `clipboard-owner` responder thread
//! - the TUI loop on the main thread (navigation keys, redraws)
//!
//! Store, navigation and statistics live in one [`CaptureState`] behind one
//! mutex. Nothing else is shared mutably.

pub mod copy_task;
pub mod dispatcher;
pub mod responder;
pub mod shutdown;

pub use copy_task::CopyTiming;
pub use dispatcher::{InputDispatcher, ModifierTracker};
pub use responder::{spawn_responder, ExportHandle, ResponderCommand};
pub use shutdown::ShutdownSignal;

use crate::model::{Decision, KeyAction, LogEntry, PlatformError, Statistics};
use crate::output::CaptureOutputs;
use crate::platform::{ClipboardReader, ForegroundProbe, KeystrokeInjector};
use crate::state::{CaptureSnapshot, CaptureState};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Notifications for the rendering side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A capture was stored; redraw.
    CaptureRecorded {
        /// Sequence number of the new entry.
        sequence: u64,
    },
}

/// Result of a navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Navigation state changed; redraw.
    Updated,
    /// Selected text handed to the clipboard responder.
    Exported,
    /// Copy requested with no selection, or the responder is gone.
    NothingToExport,
    /// Quit requested; shutdown has been signalled.
    Quit,
}

/// Platform capabilities used by the copy task.
#[derive(Clone)]
pub struct Platform {
    /// Clipboard text source.
    pub reader: Arc<dyn ClipboardReader>,
    /// Copy chord sender.
    pub injector: Arc<dyn KeystrokeInjector>,
    /// Self-trigger guard.
    pub foreground: Arc<dyn ForegroundProbe>,
}

/// Shared handle to the capture state and its collaborators.
///
/// Cheap to clone; every clone refers to the same state.
#[derive(Clone)]
pub struct CoordinationCore {
    state: Arc<Mutex<CaptureState>>,
    outputs: Arc<CaptureOutputs>,
    platform: Platform,
    timing: CopyTiming,
    exporter: ExportHandle,
    shutdown: ShutdownSignal,
    ui_tx: Option<Sender<UiEvent>>,
}

impl CoordinationCore {
    /// Bind state, outputs and capabilities together.
    pub fn new(
        state: CaptureState,
        outputs: CaptureOutputs,
        platform: Platform,
        exporter: ExportHandle,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            outputs: Arc::new(outputs),
            platform,
            timing: CopyTiming::default(),
            exporter,
            shutdown,
            ui_tx: None,
        }
    }

    /// Override the copy task delays.
    pub fn with_timing(mut self, timing: CopyTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Send a [`UiEvent`] on every stored capture.
    pub fn with_ui_events(mut self, tx: Sender<UiEvent>) -> Self {
        self.ui_tx = Some(tx);
        self
    }

    /// A gesture was classified. Spawns a copy task for either trigger kind.
    ///
    /// Returns the task handle, or `None` when nothing was spawned.
    pub fn on_gesture_trigger(&self, decision: Decision) -> Option<JoinHandle<()>> {
        if !decision.is_trigger() || self.shutdown.is_triggered() {
            return None;
        }
        debug!(?decision, "Gesture triggered");

        let core = self.clone();
        let spawned = thread::Builder::new()
            .name("copy-task".to_string())
            .spawn(move || copy_task::run(&core))
            .map_err(|e| PlatformError::ThreadSpawn {
                name: "copy-task",
                reason: e.to_string(),
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Copy task not started");
                None
            }
        }
    }

    /// Store captured clipboard text and publish it.
    ///
    /// Empty text is ignored. Returns the stored entry.
    pub fn on_capture_complete(&self, text: &str) -> Option<LogEntry> {
        if text.is_empty() {
            return None;
        }

        // Publishing under the lock keeps the capture log in sequence order.
        let mut state = self.lock_state();
        let entry = state.record_capture(text);
        info!(
            sequence = entry.sequence(),
            bytes = entry.len(),
            "Capture recorded"
        );

        self.outputs.publish(text);
        if let Some(tx) = &self.ui_tx {
            let _ = tx.send(UiEvent::CaptureRecorded {
                sequence: entry.sequence(),
            });
        }
        drop(state);
        Some(entry)
    }

    /// Apply a key action from the navigation loop.
    pub fn on_navigation_key(&self, action: KeyAction) -> NavigationOutcome {
        match action {
            KeyAction::Quit => {
                info!("Quit requested");
                self.shutdown();
                NavigationOutcome::Quit
            }
            KeyAction::CopySelected => self.on_copy_selected_request(),
            _ => {
                self.lock_state().apply_navigation(action);
                NavigationOutcome::Updated
            }
        }
    }

    /// Export the selected entry through the clipboard responder.
    ///
    /// Read-only: the log is not modified.
    pub fn on_copy_selected_request(&self) -> NavigationOutcome {
        let Some(text) = self.lock_state().selected_text() else {
            return NavigationOutcome::NothingToExport;
        };

        let bytes = text.len();
        if self.exporter.claim(text) {
            debug!(bytes, "Selected entry exported");
            NavigationOutcome::Exported
        } else {
            warn!("Clipboard responder is not running");
            NavigationOutcome::NothingToExport
        }
    }

    /// Viewport height changed.
    pub fn resize(&self, visible_height: usize) {
        self.lock_state().resize(visible_height);
    }

    /// Consistent view for rendering.
    pub fn snapshot(&self) -> CaptureSnapshot {
        self.lock_state().snapshot()
    }

    /// Totals since startup.
    pub fn statistics(&self) -> Statistics {
        self.lock_state().statistics()
    }

    /// Signal every task to stop and release the clipboard.
    pub fn shutdown(&self) {
        self.shutdown.trigger();
        self.exporter.shutdown();
    }

    /// Whether shutdown was requested.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Stop signal shared with the other tasks.
    pub fn shutdown_signal(&self) -> &ShutdownSignal {
        &self.shutdown
    }

    pub(crate) fn outputs(&self) -> &CaptureOutputs {
        &self.outputs
    }

    pub(crate) fn platform(&self) -> &Platform {
        &self.platform
    }

    pub(crate) fn timing(&self) -> CopyTiming {
        self.timing
    }

    // A panicking holder cannot leave CaptureState half-updated in a way
    // that breaks its invariants, so poisoned locks are recovered.
    fn lock_state(&self) -> MutexGuard<'_, CaptureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "coordination_tests.rs"]
mod tests;
