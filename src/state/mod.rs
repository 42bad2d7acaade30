//! Capture state machines (pure).
//!
//! All state transitions are plain methods testable without a terminal,
//! input hook or clipboard.

pub mod capture_state;
pub mod gesture;
pub mod log_store;
pub mod navigation;

// Re-export for convenience
pub use capture_state::{CaptureSnapshot, CaptureState, VisibleRow};
pub use gesture::{platform_double_click_ms, GestureClassifier, GestureConfig, GestureState};
pub use log_store::LogStore;
pub use navigation::NavigationState;
