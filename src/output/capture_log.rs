//! Append-only capture log (`--log <file>`).
//!
//! Best-effort: every I/O failure is traced at debug level and dropped so a
//! broken log never interrupts capturing.

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Timestamp layout for each line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Capture log file. The file is reopened in append mode for every line.
#[derive(Debug)]
pub struct CaptureLog {
    path: PathBuf,
    // Serializes writers so concurrent copy tasks never interleave lines.
    write_lock: Mutex<()>,
}

impl CaptureLog {
    /// Log to `path`. The file is created lazily on the first capture.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `text` stamped with the current local time.
    pub fn append(&self, text: &str) {
        self.append_at(Local::now(), text);
    }

    /// Append `text` stamped with `at`.
    pub fn append_at(&self, at: DateTime<Local>, text: &str) {
        let line = format_line(at, text);
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            debug!(path = %self.path.display(), error = %e, "Capture log write failed");
        }
    }
}

/// `[YYYY-MM-DD HH:MM:SS] text\n`
pub(crate) fn format_line(at: DateTime<Local>, text: &str) -> String {
    format!("[{}] {}\n", at.format(TIMESTAMP_FORMAT), text)
}
