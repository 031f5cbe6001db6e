//! Host link
//!
//! Page selection, frame pumping and handshake replies. The firmware's
//! control task drives this once per tick.

pub mod host;

pub use host::{HostLink, LinkError};
