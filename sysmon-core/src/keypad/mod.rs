//! Keypad input processing

pub mod debounce;

pub use debounce::{ButtonDebouncer, SampleError};
