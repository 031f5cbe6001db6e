//! Command dispatcher
//!
//! Takes one reassembled frame at a time, validates and decodes it, and
//! renders the value into its slot. Nothing is retained between frames
//! except the fan animation phase and the drop counter.

use core::fmt::Write;

use heapless::String;
use sysmon_protocol::{CommandFrame, CommandKind, HostCommand, ProtocolError};

use super::glyphs::{GLYPH_FAN_A, GLYPH_FAN_B};
use super::layout::{ScreenSlot, SlotGlyph};
use crate::config::PanelConfig;
use crate::traits::{CharacterDisplay, DisplayExt};

/// Longest formatted value ("255/255/65535")
const FIELD_CAPACITY: usize = 16;

/// What happened to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Handshake received; the caller answers it
    Ready,
    /// Value drawn into its slot
    Rendered(CommandKind),
    /// Slot starts past the last column; nothing drawn
    OffPanel(CommandKind),
    /// Frame ignored, display untouched
    Dropped(ProtocolError),
}

/// Renders host commands onto a character display
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    panel: PanelConfig,
    /// Which fan frame the next fan update shows
    fan_phase: bool,
    /// Frames dropped as malformed or unknown
    dropped: u32,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl CommandDispatcher {
    pub const fn new(panel: PanelConfig) -> Self {
        Self {
            panel,
            fan_phase: false,
            dropped: 0,
        }
    }

    pub fn panel(&self) -> &PanelConfig {
        &self.panel
    }

    /// Validate, decode and render one frame
    ///
    /// Only display errors are returned as `Err`; a bad frame is a normal
    /// [`Dispatch::Dropped`] outcome and leaves the display untouched.
    pub fn dispatch<D>(
        &mut self,
        display: &mut D,
        frame: &CommandFrame,
    ) -> Result<Dispatch, D::Error>
    where
        D: CharacterDisplay + ?Sized,
    {
        match HostCommand::from_frame(frame) {
            Ok(command) => self.render(display, &command),
            Err(err) => Ok(self.drop_frame(err)),
        }
    }

    /// Draw a decoded command into its slot
    ///
    /// The handshake draws nothing and yields [`Dispatch::Ready`].
    pub fn render<D>(&mut self, display: &mut D, command: &HostCommand) -> Result<Dispatch, D::Error>
    where
        D: CharacterDisplay + ?Sized,
    {
        let Some(kind) = command.kind() else {
            return Ok(Dispatch::Ready);
        };

        let slot = ScreenSlot::for_kind(kind, &self.panel);
        if slot.col >= self.panel.columns {
            return Ok(Dispatch::OffPanel(kind));
        }

        display.set_cursor(slot.row, slot.col)?;
        if let Some(glyph) = slot.glyph {
            let code = match glyph {
                SlotGlyph::Fixed(code) => code,
                SlotGlyph::Fan => self.next_fan_glyph(),
            };
            display.write_char(code)?;
        }

        match command {
            HostCommand::Text(text) => display.print_field(text, slot.width)?,
            _ => display.print_str_field(&format_value(command), slot.width)?,
        }

        Ok(Dispatch::Rendered(kind))
    }

    /// Count a frame that never reached the display
    pub fn drop_frame(&mut self, reason: ProtocolError) -> Dispatch {
        self.dropped = self.dropped.saturating_add(1);
        Dispatch::Dropped(reason)
    }

    /// Frames dropped since start or the last [`take_dropped`](Self::take_dropped)
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn take_dropped(&mut self) -> u32 {
        core::mem::take(&mut self.dropped)
    }

    fn next_fan_glyph(&mut self) -> u8 {
        self.fan_phase = !self.fan_phase;
        if self.fan_phase {
            GLYPH_FAN_A
        } else {
            GLYPH_FAN_B
        }
    }
}

/// Format the value of a numeric or clock command
fn format_value(command: &HostCommand) -> String<FIELD_CAPACITY> {
    let mut out = String::new();
    // FIELD_CAPACITY covers the widest value, so writes cannot overflow
    let _ = match *command {
        HostCommand::Date { month, day, year } => {
            write!(out, "{:02}/{:02}/{}", month, day, year)
        }
        HostCommand::Time { hour, minute, pm } => {
            let suffix = if pm { "PM" } else { "AM" };
            write!(out, "{:02}:{:02} {}", hour, minute, suffix)
        }
        HostCommand::CpuTemp(celsius) | HostCommand::GpuTemp(celsius) => {
            write!(out, "{}C", celsius)
        }
        HostCommand::CpuUsage(percent)
        | HostCommand::GpuUsage(percent)
        | HostCommand::MemUsage(percent)
        | HostCommand::VramUsage(percent) => write!(out, "{:02}%", percent),
        HostCommand::CpuFan(rpm) | HostCommand::GpuFan(rpm) => write!(out, "{}RPM", rpm),
        HostCommand::Ready | HostCommand::Text(_) => Ok(()),
    };
    out
}
