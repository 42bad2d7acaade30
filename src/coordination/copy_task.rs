//! Delayed copy execution, one thread per trigger.

use super::CoordinationCore;
use std::time::Duration;
use tracing::{debug, warn};

/// Delays of the copy task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyTiming {
    /// Wait after the click so the target application finishes selecting.
    pub click_settle: Duration,
    /// Wait after the copy chord so the target application fills the clipboard.
    pub copy_settle: Duration,
}

impl CopyTiming {
    /// Default settle after the click.
    pub const DEFAULT_CLICK_SETTLE: Duration = Duration::from_millis(200);
    /// Default settle after the chord.
    pub const DEFAULT_COPY_SETTLE: Duration = Duration::from_millis(100);

    /// No delays.
    pub const IMMEDIATE: Self = Self {
        click_settle: Duration::ZERO,
        copy_settle: Duration::ZERO,
    };
}

impl Default for CopyTiming {
    fn default() -> Self {
        Self {
            click_settle: Self::DEFAULT_CLICK_SETTLE,
            copy_settle: Self::DEFAULT_COPY_SETTLE,
        }
    }
}

/// Body of a copy task.
///
/// Settle, inject the copy chord, then (if anything consumes captures)
/// settle again and hand the clipboard text to the core. Both waits end
/// early on shutdown.
pub(crate) fn run(core: &CoordinationCore) {
    let timing = core.timing();
    let shutdown = core.shutdown_signal();

    if shutdown.wait_timeout(timing.click_settle) {
        return;
    }

    if core.platform().foreground.foreground_is_self() {
        debug!("Foreground window is ours; capture skipped");
        return;
    }

    if let Err(e) = core.platform().injector.send_copy_chord() {
        warn!(error = %e, "Copy chord failed");
        return;
    }

    if !core.outputs().wants_capture() {
        return;
    }

    if shutdown.wait_timeout(timing.copy_settle) {
        return;
    }

    match core.platform().reader.read_text() {
        Ok(Some(text)) if !text.is_empty() => {
            core.on_capture_complete(&text);
        }
        Ok(_) => debug!("Clipboard empty after copy"),
        Err(e) => warn!(error = %e, "Clipboard read failed"),
    }
}
