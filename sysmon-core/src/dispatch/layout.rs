//! Fixed screen layout
//!
//! Every telemetry kind has one slot. The host streams one page at a time,
//! so slots of different pages may share cells:
//!
//! ```text
//!          0123456789012345
//! clock   "   03/25/2025   "   Date, Time
//!         "    09:05 PM    "
//! load    "T45C  C07%  M42%"   CpuTemp, CpuUsage, MemUsage
//!         "T61C  C99%  M13%"   GpuTemp, GpuUsage, VramUsage
//! fans    "F1200RPM        "   CpuFan
//!         "F850RPM         "   GpuFan
//! text    "Now playing...  "   Text
//! ```
//!
//! (`T`, `C`, `M`, `F` stand for the custom glyphs.)

use sysmon_protocol::CommandKind;

use super::glyphs::{GLYPH_CPU, GLYPH_MEMORY, GLYPH_TEMPERATURE};
use crate::config::PanelConfig;

/// Glyph drawn in the first cell of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotGlyph {
    /// Always the same glyph index
    Fixed(u8),
    /// Alternates between the two fan frames on each update
    Fan,
}

/// Where and how wide a rendered field is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenSlot {
    pub row: u8,
    pub col: u8,
    pub glyph: Option<SlotGlyph>,
    /// Text cells after the glyph, blanked on every update
    pub width: u8,
}

impl ScreenSlot {
    const fn new(row: u8, col: u8, glyph: Option<SlotGlyph>, width: u8) -> Self {
        Self {
            row,
            col,
            glyph,
            width,
        }
    }

    /// Column where the text starts
    pub const fn text_col(&self) -> u8 {
        match self.glyph {
            Some(_) => self.col + 1,
            None => self.col,
        }
    }

    /// Slot for `kind`, with the width cut to what the panel can show
    pub fn for_kind(kind: CommandKind, panel: &PanelConfig) -> Self {
        let slot = match kind {
            CommandKind::Date => Self::new(0, 3, None, 10),
            CommandKind::Time => Self::new(1, 4, None, 8),
            CommandKind::CpuTemp => Self::new(0, 0, Some(SlotGlyph::Fixed(GLYPH_TEMPERATURE)), 4),
            CommandKind::CpuUsage => Self::new(0, 6, Some(SlotGlyph::Fixed(GLYPH_CPU)), 4),
            CommandKind::MemUsage => Self::new(0, 11, Some(SlotGlyph::Fixed(GLYPH_MEMORY)), 4),
            CommandKind::GpuTemp => Self::new(1, 0, Some(SlotGlyph::Fixed(GLYPH_TEMPERATURE)), 4),
            CommandKind::GpuUsage => Self::new(1, 6, Some(SlotGlyph::Fixed(GLYPH_CPU)), 4),
            CommandKind::VramUsage => Self::new(1, 11, Some(SlotGlyph::Fixed(GLYPH_MEMORY)), 4),
            CommandKind::CpuFan => Self::new(0, 0, Some(SlotGlyph::Fan), 8),
            CommandKind::GpuFan => Self::new(1, 0, Some(SlotGlyph::Fan), 8),
            CommandKind::Text => Self::new(0, 0, None, panel.columns),
        };

        let room = panel.columns.saturating_sub(slot.text_col());
        Self {
            width: slot.width.min(room),
            ..slot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [CommandKind; 11] = [
        CommandKind::Date,
        CommandKind::Time,
        CommandKind::CpuTemp,
        CommandKind::CpuUsage,
        CommandKind::CpuFan,
        CommandKind::GpuTemp,
        CommandKind::GpuUsage,
        CommandKind::GpuFan,
        CommandKind::MemUsage,
        CommandKind::VramUsage,
        CommandKind::Text,
    ];

    #[test]
    fn test_cpu_temp_slot() {
        let slot = ScreenSlot::for_kind(CommandKind::CpuTemp, &PanelConfig::default());
        assert_eq!((slot.row, slot.col), (0, 0));
        assert_eq!(slot.glyph, Some(SlotGlyph::Fixed(GLYPH_TEMPERATURE)));
        assert_eq!(slot.text_col(), 1);
    }

    #[test]
    fn test_slots_fit_default_panel() {
        let panel = PanelConfig::default();
        for kind in ALL_KINDS {
            let slot = ScreenSlot::for_kind(kind, &panel);
            assert!(slot.row < panel.rows);
            assert!(slot.text_col() + slot.width <= panel.columns);
        }
    }

    #[test]
    fn test_text_width_follows_panel() {
        let wide = PanelConfig {
            columns: 20,
            rows: 4,
        };
        assert_eq!(ScreenSlot::for_kind(CommandKind::Text, &wide).width, 20);
    }

    #[test]
    fn test_width_clipped_on_narrow_panel() {
        let narrow = PanelConfig {
            columns: 8,
            rows: 2,
        };
        let slot = ScreenSlot::for_kind(CommandKind::Date, &narrow);
        assert_eq!(slot.width, 5);
        let slot = ScreenSlot::for_kind(CommandKind::MemUsage, &narrow);
        assert_eq!(slot.width, 0);
    }
}
