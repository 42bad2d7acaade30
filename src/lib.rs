//! autocopy
//!
//! Copies the current selection whenever a configured mouse gesture is
//! performed, and keeps a live, scrollable log of everything captured.
//!
//! Layout follows a Pure Core / Impure Shell split: gesture classification,
//! the bounded log and navigation are plain state machines under [`state`];
//! the input hook, clipboard, keystrokes and terminal live behind traits in
//! [`platform`] and [`view`]; [`coordination`] glues them together.

pub mod config;
pub mod coordination;
pub mod logging;
pub mod model;
pub mod output;
pub mod platform;
pub mod state;
pub mod view;

// Startup wiring used by the binary
pub mod integration;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
