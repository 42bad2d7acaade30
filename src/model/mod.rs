//! Domain model types (pure).
//!
//! All types in this module are plain data with no side effects.

pub mod capture;
pub mod click;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use capture::{LogEntry, Statistics};
pub use click::{ClickEvent, Decision, Modifiers, MouseButton};
pub use error::{AppError, PlatformError};
pub use key_action::KeyAction;
