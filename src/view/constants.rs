//! Layout and timing constants for the live log.

use std::time::Duration;

/// Header bands above the log area (title, arguments, statistics).
pub const HEADER_HEIGHT: u16 = 3;

/// How long the event loop blocks waiting for terminal input before it
/// checks for new captures and shutdown.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Timestamp layout of the "Started:" field.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rows available for log lines in a terminal `height` rows tall.
pub fn log_area_height(height: u16) -> usize {
    usize::from(height.saturating_sub(HEADER_HEIGHT))
}
