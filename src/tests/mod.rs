//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the public entry points end to end with recording fakes in
//! place of the input hook, clipboard and keystroke injector.
