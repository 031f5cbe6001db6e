//! Character LCD drivers

pub mod command;
pub mod hd44780;

pub use hd44780::{DisplayState, Hd44780, Hd44780Pins, LcdError};
