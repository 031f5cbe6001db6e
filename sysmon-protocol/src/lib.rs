//! Host link protocol for the sysmon-lcd telemetry display
//!
//! This crate defines the serial protocol between the host PC (telemetry
//! source) and the display device (16x2 character LCD plus keypad).
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌──────┬────────┬─────────────┬──────────┐
//! │ CODE │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 1B   │ 1B     │ 0–64B       │ 1B       │
//! └──────┴────────┴─────────────┴──────────┘
//! ```
//!
//! The checksum is a plain XOR of every preceding byte. It catches single
//! bit flips on a short local link; it is not an integrity guarantee.
//!
//! The host pushes values, the device renders them at fixed positions and
//! reports keypad presses back as `BUTTON` frames.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod messages;
pub mod queue;

pub use events::Button;
pub use frame::{
    checksum, encode_report, try_take_frame, CommandFrame, FrameError, FrameReader,
    MAX_FRAME_SIZE, MAX_PAYLOAD_LEN,
};
pub use messages::{CommandKind, DeviceMessage, HostCommand, ProtocolError};
pub use queue::{ByteSource, RxQueue, RX_QUEUE_SIZE};
