//! Board-agnostic core logic for the telemetry display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Character display trait
//! - Keypad debouncing
//! - Command dispatch and the fixed screen layout
//! - Host link session (page selection, handshake replies)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod keypad;
pub mod link;
pub mod traits;
