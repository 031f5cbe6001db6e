//! Configuration types
//!
//! Compile-time board configuration. Nothing here is persisted.

pub mod keypad;
pub mod panel;

pub use keypad::*;
pub use panel::*;
