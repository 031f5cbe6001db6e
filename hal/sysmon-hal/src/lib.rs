//! sysmon-lcd Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the board-agnostic
//! crates are written against. Chip-specific HALs implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sysmon-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sysmon-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  sysmon-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`adc::AnalogInput`] - Single-channel analog sampling
//! - [`uart::UartTx`] - Serial transmit
//!
//! Character display pins use `embedded-hal` directly and are not
//! abstracted here.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use uart::{UartConfig, UartTx};
