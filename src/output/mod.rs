//! Where completed captures go besides the in-memory log.

pub mod capture_log;

pub use capture_log::CaptureLog;

/// Output switches resolved from configuration.
#[derive(Debug, Default)]
pub struct CaptureOutputs {
    /// Live terminal log is running.
    pub tui: bool,
    /// Echo each capture to stdout.
    pub show_text: bool,
    /// No console output at all.
    pub batch: bool,
    /// Optional capture log file.
    pub capture_log: Option<CaptureLog>,
}

impl CaptureOutputs {
    /// Whether the clipboard must be read after the copy chord.
    ///
    /// With no consumer the copy task only injects the chord.
    pub fn wants_capture(&self) -> bool {
        self.tui || self.show_text || self.capture_log.is_some()
    }

    /// Whether captures are echoed as `[Clipboard]: text`.
    pub fn echoes_to_console(&self) -> bool {
        self.show_text && !self.tui && !self.batch
    }

    /// Send a stored capture to the file log and, if enabled, the console.
    pub fn publish(&self, text: &str) {
        if let Some(log) = &self.capture_log {
            log.append(text);
        }
        if self.echoes_to_console() {
            println!("{}", console_line(text));
        }
    }
}

/// Console echo format.
pub fn console_line(text: &str) -> String {
    format!("[Clipboard]: {text}")
}
