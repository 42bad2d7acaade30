//! Clipboard-ownership responder.
//!
//! A single `clipboard-owner` thread owns the [`ClipboardOwner`] capability for
//! the whole run. Other tasks only send it commands through an
//! [`ExportHandle`]; ownership is released when the loop exits, whichever way
//! it exits.

use super::ShutdownSignal;
use crate::model::PlatformError;
use crate::platform::ClipboardOwner;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How often the responder re-checks the shutdown flag while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Commands accepted by the responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderCommand {
    /// Become the clipboard owner serving this text.
    Claim(String),
    /// Release ownership and stop.
    Shutdown,
}

/// Sending side of the responder channel.
#[derive(Debug, Clone)]
pub struct ExportHandle {
    tx: Sender<ResponderCommand>,
}

impl ExportHandle {
    /// Wrap an existing command sender.
    pub fn new(tx: Sender<ResponderCommand>) -> Self {
        Self { tx }
    }

    /// Ask the responder to serve `text`. Returns `false` if it has stopped.
    pub fn claim(&self, text: String) -> bool {
        self.tx.send(ResponderCommand::Claim(text)).is_ok()
    }

    /// Ask the responder to release ownership and exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(ResponderCommand::Shutdown);
    }
}

/// Start the responder thread around `owner`.
///
/// # Errors
///
/// Returns `PlatformError::ThreadSpawn` if the thread cannot be created.
pub fn spawn_responder<O>(
    owner: O,
    shutdown: ShutdownSignal,
) -> Result<(ExportHandle, JoinHandle<()>), PlatformError>
where
    O: ClipboardOwner + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("clipboard-owner".to_string())
        .spawn(move || run_responder(owner, &rx, &shutdown))
        .map_err(|e| PlatformError::ThreadSpawn {
            name: "clipboard-owner",
            reason: e.to_string(),
        })?;
    Ok((ExportHandle::new(tx), handle))
}

/// Responder loop. Blocks until shutdown, then releases ownership.
pub fn run_responder<O: ClipboardOwner>(
    mut owner: O,
    rx: &Receiver<ResponderCommand>,
    shutdown: &ShutdownSignal,
) {
    info!("Clipboard responder started");
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(ResponderCommand::Claim(text)) => match owner.claim(&text) {
                Ok(()) => debug!(bytes = text.len(), "Clipboard ownership claimed"),
                Err(e) => warn!(error = %e, "Failed to claim clipboard"),
            },
            Ok(ResponderCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                if shutdown.is_triggered() {
                    break;
                }
            }
        }
    }
    owner.release();
    info!("Clipboard responder stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::RecordingOwner;

    #[test]
    fn claims_in_order_then_releases_on_shutdown_command() {
        let owner = RecordingOwner::new();
        let shutdown = ShutdownSignal::new();
        let (handle, join) = spawn_responder(owner.clone(), shutdown).unwrap();

        assert!(handle.claim("one".to_string()));
        assert!(handle.claim("two".to_string()));
        handle.shutdown();
        join.join().unwrap();

        assert_eq!(owner.claims(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(owner.release_count(), 1);
    }

    #[test]
    fn stops_when_shutdown_signal_fires() {
        let owner = RecordingOwner::new();
        let shutdown = ShutdownSignal::new();
        let (_handle, join) = spawn_responder(owner.clone(), shutdown.clone()).unwrap();

        shutdown.trigger();
        join.join().unwrap();

        assert_eq!(owner.release_count(), 1);
    }

    #[test]
    fn stops_when_all_handles_dropped() {
        let owner = RecordingOwner::new();
        let (tx, rx) = mpsc::channel();
        drop(tx);

        run_responder(owner.clone(), &rx, &ShutdownSignal::new());

        assert_eq!(owner.release_count(), 1);
    }

    #[test]
    fn claim_failure_keeps_responder_running() {
        let owner = RecordingOwner::failing();
        let (tx, rx) = mpsc::channel();
        tx.send(ResponderCommand::Claim("x".to_string())).unwrap();
        tx.send(ResponderCommand::Claim("y".to_string())).unwrap();
        tx.send(ResponderCommand::Shutdown).unwrap();

        run_responder(owner.clone(), &rx, &ShutdownSignal::new());

        assert_eq!(owner.attempts(), 2);
        assert_eq!(owner.release_count(), 1);
    }

    #[test]
    fn claim_after_stop_reports_failure() {
        let (tx, rx) = mpsc::channel();
        let handle = ExportHandle::new(tx);
        drop(rx);

        assert!(!handle.claim("late".to_string()));
    }
}
