//! Command dispatch
//!
//! Maps validated host commands onto the fixed screen layout.

pub mod dispatcher;
pub mod glyphs;
pub mod layout;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{CommandDispatcher, Dispatch};
pub use glyphs::{load_glyphs, CustomGlyph, GLYPHS};
pub use layout::{ScreenSlot, SlotGlyph};
