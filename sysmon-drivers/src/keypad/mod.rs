//! Keypad drivers

pub mod analog;

pub use analog::{AnalogKeypad, KeypadError};
