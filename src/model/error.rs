//! Error types for autocopy.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions up to [`AppError`], which the binary maps to exit
//! code 1.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error; every variant is fatal at startup
//!   - [`ConfigError`] - Config file could not be read or parsed
//!   - [`PlatformError`] - Input hook, clipboard, keystroke or thread failures
//!   - `std::io::Error` - Terminal setup/rendering failures
//!
//! # Recovery Strategy
//!
//! Only resource acquisition at startup is fatal. Once the background tasks are
//! running, capture-path failures (empty clipboard, failed chord injection,
//! foreground window owned by this process) are skipped and traced, and the
//! capture log file is best-effort. Diagnostics logging is optional too: a
//! subscriber that cannot be installed only produces a warning on stderr.

use crate::config::ConfigError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A platform capability could not be acquired or used.
    #[error("{0}")]
    Platform(#[from] PlatformError),

    /// Terminal or TUI rendering error.
    ///
    /// Raised by crossterm/ratatui when the terminal cannot be switched to raw
    /// mode, drawn to, or read from.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures of the platform collaborators (hook, clipboard, keystrokes).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The global input hook could not be installed or stopped unexpectedly.
    #[error("Input hook unavailable: {0}")]
    InputHook(String),

    /// No clipboard/display session could be opened.
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// Reading the clipboard failed for a reason other than "empty".
    #[error("Clipboard read failed: {0}")]
    ClipboardRead(String),

    /// Claiming clipboard ownership failed.
    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(String),

    /// The synthetic copy chord could not be sent.
    #[error("Keystroke injection failed: {0}")]
    KeystrokeInjection(String),

    /// The SIGINT/SIGTERM handler could not be installed.
    #[error("Signal handler unavailable: {0}")]
    SignalHandler(String),

    /// A background task thread could not be spawned.
    #[error("Failed to spawn {name} thread: {reason}")]
    ThreadSpawn {
        /// Thread name.
        name: &'static str,
        /// OS error message.
        reason: String,
    },
}
