//! Message types for the host link
//!
//! Message codes are divided into two directions:
//! - Host → Device: telemetry values to render
//! - Device → Host: ready handshake, button reports
//!
//! Code 0x00 (READY) is used in both directions.

use heapless::Vec;

use crate::events::Button;
use crate::frame::{CommandFrame, FrameError, MAX_PAYLOAD_LEN};

// Both directions
pub const CMD_READY: u8 = 0x00;

// Device → Host
pub const CMD_BUTTON: u8 = 0x01;

// Host → Device
pub const CMD_DATE: u8 = 0x02;
pub const CMD_TIME: u8 = 0x03;
pub const CMD_CPU_TEMP: u8 = 0x04;
pub const CMD_CPU_USAGE: u8 = 0x05;
pub const CMD_CPU_FAN: u8 = 0x06;
pub const CMD_GPU_TEMP: u8 = 0x07;
pub const CMD_GPU_USAGE: u8 = 0x08;
pub const CMD_GPU_FAN: u8 = 0x09;
pub const CMD_MEM_USAGE: u8 = 0x0A;
pub const CMD_TEXT: u8 = 0x0B;
pub const CMD_VRAM_USAGE: u8 = 0x0C;

/// Reasons a received frame is not acted on
///
/// Neither is ever shown on the display; the firmware only logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Checksum mismatch, bad READY shape, or payload shorter than the command needs
    MalformedFrame,
    /// Well-formed frame with a code this firmware does not render
    UnknownCommand(u8),
}

/// Renderable telemetry kinds, one per screen slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    Date,
    Time,
    CpuTemp,
    CpuUsage,
    CpuFan,
    GpuTemp,
    GpuUsage,
    GpuFan,
    MemUsage,
    VramUsage,
    Text,
}

/// Commands sent by the host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Handshake, carries no payload
    Ready,
    /// Calendar date
    Date { month: u8, day: u8, year: u16 },
    /// 12-hour wall clock time
    Time { hour: u8, minute: u8, pm: bool },
    /// CPU temperature in °C
    CpuTemp(u8),
    /// CPU utilization in percent
    CpuUsage(u8),
    /// CPU fan speed in RPM
    CpuFan(u16),
    /// GPU temperature in °C
    GpuTemp(u8),
    /// GPU utilization in percent
    GpuUsage(u8),
    /// GPU fan speed in RPM
    GpuFan(u16),
    /// System memory utilization in percent
    MemUsage(u8),
    /// Video memory utilization in percent
    VramUsage(u8),
    /// Free text (now playing, status line)
    Text(Vec<u8, MAX_PAYLOAD_LEN>),
}

/// Copy the first `N` payload bytes, or fail if the payload is shorter
fn fields<const N: usize>(payload: &[u8]) -> Result<[u8; N], ProtocolError> {
    payload
        .get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(ProtocolError::MalformedFrame)
}

impl HostCommand {
    /// Parse a command from a received frame
    ///
    /// Frames failing the checksum never get past this point. Payloads
    /// longer than a command needs are accepted and the excess ignored.
    pub fn from_frame(frame: &CommandFrame) -> Result<Self, ProtocolError> {
        if !frame.is_valid() {
            return Err(ProtocolError::MalformedFrame);
        }

        let payload = frame.payload.as_slice();
        match frame.code {
            CMD_READY => {
                if payload.is_empty() {
                    Ok(HostCommand::Ready)
                } else {
                    Err(ProtocolError::MalformedFrame)
                }
            }
            CMD_DATE => {
                let [month, day, year_hi, year_lo] = fields::<4>(payload)?;
                Ok(HostCommand::Date {
                    month,
                    day,
                    year: u16::from_be_bytes([year_hi, year_lo]),
                })
            }
            CMD_TIME => {
                let [hour, minute, pm] = fields::<3>(payload)?;
                Ok(HostCommand::Time {
                    hour,
                    minute,
                    pm: pm != 0,
                })
            }
            CMD_CPU_TEMP => Ok(HostCommand::CpuTemp(fields::<1>(payload)?[0])),
            CMD_CPU_USAGE => Ok(HostCommand::CpuUsage(fields::<1>(payload)?[0])),
            CMD_CPU_FAN => Ok(HostCommand::CpuFan(u16::from_be_bytes(fields::<2>(payload)?))),
            CMD_GPU_TEMP => Ok(HostCommand::GpuTemp(fields::<1>(payload)?[0])),
            CMD_GPU_USAGE => Ok(HostCommand::GpuUsage(fields::<1>(payload)?[0])),
            CMD_GPU_FAN => Ok(HostCommand::GpuFan(u16::from_be_bytes(fields::<2>(payload)?))),
            CMD_MEM_USAGE => Ok(HostCommand::MemUsage(fields::<1>(payload)?[0])),
            CMD_VRAM_USAGE => Ok(HostCommand::VramUsage(fields::<1>(payload)?[0])),
            CMD_TEXT => Ok(HostCommand::Text(frame.payload.clone())),
            code => Err(ProtocolError::UnknownCommand(code)),
        }
    }

    /// Encode this command into a frame (for testing or host simulation)
    pub fn to_frame(&self) -> Result<CommandFrame, FrameError> {
        match self {
            HostCommand::Ready => Ok(CommandFrame::empty(CMD_READY)),
            HostCommand::Date { month, day, year } => {
                let [year_hi, year_lo] = year.to_be_bytes();
                CommandFrame::new(CMD_DATE, &[*month, *day, year_hi, year_lo])
            }
            HostCommand::Time { hour, minute, pm } => {
                CommandFrame::new(CMD_TIME, &[*hour, *minute, *pm as u8])
            }
            HostCommand::CpuTemp(v) => CommandFrame::new(CMD_CPU_TEMP, &[*v]),
            HostCommand::CpuUsage(v) => CommandFrame::new(CMD_CPU_USAGE, &[*v]),
            HostCommand::CpuFan(rpm) => CommandFrame::new(CMD_CPU_FAN, &rpm.to_be_bytes()),
            HostCommand::GpuTemp(v) => CommandFrame::new(CMD_GPU_TEMP, &[*v]),
            HostCommand::GpuUsage(v) => CommandFrame::new(CMD_GPU_USAGE, &[*v]),
            HostCommand::GpuFan(rpm) => CommandFrame::new(CMD_GPU_FAN, &rpm.to_be_bytes()),
            HostCommand::MemUsage(v) => CommandFrame::new(CMD_MEM_USAGE, &[*v]),
            HostCommand::VramUsage(v) => CommandFrame::new(CMD_VRAM_USAGE, &[*v]),
            HostCommand::Text(text) => CommandFrame::new(CMD_TEXT, text),
        }
    }

    /// Screen slot kind, or `None` for the handshake
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            HostCommand::Ready => None,
            HostCommand::Date { .. } => Some(CommandKind::Date),
            HostCommand::Time { .. } => Some(CommandKind::Time),
            HostCommand::CpuTemp(_) => Some(CommandKind::CpuTemp),
            HostCommand::CpuUsage(_) => Some(CommandKind::CpuUsage),
            HostCommand::CpuFan(_) => Some(CommandKind::CpuFan),
            HostCommand::GpuTemp(_) => Some(CommandKind::GpuTemp),
            HostCommand::GpuUsage(_) => Some(CommandKind::GpuUsage),
            HostCommand::GpuFan(_) => Some(CommandKind::GpuFan),
            HostCommand::MemUsage(_) => Some(CommandKind::MemUsage),
            HostCommand::VramUsage(_) => Some(CommandKind::VramUsage),
            HostCommand::Text(_) => Some(CommandKind::Text),
        }
    }
}

/// Messages from the device to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage {
    /// Handshake reply
    Ready,
    /// A new button became stable
    Button(Button),
}

impl DeviceMessage {
    /// Encode this message into a frame
    ///
    /// `Button(Button::None)` has no wire index and is refused.
    pub fn to_frame(&self) -> Option<CommandFrame> {
        match self {
            DeviceMessage::Ready => Some(CommandFrame::empty(CMD_READY)),
            DeviceMessage::Button(button) => {
                let index = button.index()?;
                CommandFrame::new(CMD_BUTTON, &[index]).ok()
            }
        }
    }

    /// Parse a device message from a frame (host side / tests)
    pub fn from_frame(frame: &CommandFrame) -> Result<Self, ProtocolError> {
        if !frame.is_valid() {
            return Err(ProtocolError::MalformedFrame);
        }
        match frame.code {
            CMD_READY if frame.payload.is_empty() => Ok(DeviceMessage::Ready),
            CMD_READY => Err(ProtocolError::MalformedFrame),
            CMD_BUTTON => {
                let [index] = fields::<1>(&frame.payload)?;
                Button::from_index(index)
                    .map(DeviceMessage::Button)
                    .ok_or(ProtocolError::MalformedFrame)
            }
            code => Err(ProtocolError::UnknownCommand(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(code: u8, payload: &[u8]) -> CommandFrame {
        CommandFrame::new(code, payload).unwrap()
    }

    #[test]
    fn test_parse_cpu_temp() {
        let cmd = HostCommand::from_frame(&frame(0x04, &[0x2D])).unwrap();
        assert_eq!(cmd, HostCommand::CpuTemp(45));
        assert_eq!(cmd.kind(), Some(CommandKind::CpuTemp));
    }

    #[test]
    fn test_parse_date_big_endian_year() {
        let cmd = HostCommand::from_frame(&frame(CMD_DATE, &[3, 25, 0x07, 0xE9])).unwrap();
        assert_eq!(
            cmd,
            HostCommand::Date {
                month: 3,
                day: 25,
                year: 2025
            }
        );
    }

    #[test]
    fn test_parse_time_pm_flag() {
        let cmd = HostCommand::from_frame(&frame(CMD_TIME, &[9, 5, 1])).unwrap();
        assert_eq!(
            cmd,
            HostCommand::Time {
                hour: 9,
                minute: 5,
                pm: true
            }
        );
    }

    #[test]
    fn test_parse_fan_speed() {
        let cmd = HostCommand::from_frame(&frame(CMD_GPU_FAN, &[0x04, 0xB0])).unwrap();
        assert_eq!(cmd, HostCommand::GpuFan(1200));
    }

    #[test]
    fn test_ready_only_with_zero_length() {
        assert_eq!(
            HostCommand::from_frame(&CommandFrame::empty(CMD_READY)),
            Ok(HostCommand::Ready)
        );
        assert_eq!(
            HostCommand::from_frame(&frame(CMD_READY, &[0x00])),
            Err(ProtocolError::MalformedFrame)
        );
    }

    #[test]
    fn test_bad_checksum_is_malformed() {
        let mut f = frame(CMD_CPU_TEMP, &[50]);
        f.checksum ^= 0x10;
        assert_eq!(
            HostCommand::from_frame(&f),
            Err(ProtocolError::MalformedFrame)
        );
    }

    #[test]
    fn test_short_payload_is_malformed() {
        assert_eq!(
            HostCommand::from_frame(&frame(CMD_DATE, &[1, 2])),
            Err(ProtocolError::MalformedFrame)
        );
        assert_eq!(
            HostCommand::from_frame(&frame(CMD_CPU_USAGE, &[])),
            Err(ProtocolError::MalformedFrame)
        );
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            HostCommand::from_frame(&frame(0x42, &[1])),
            Err(ProtocolError::UnknownCommand(0x42))
        );
        // Button reports only travel device → host
        assert_eq!(
            HostCommand::from_frame(&frame(CMD_BUTTON, &[1])),
            Err(ProtocolError::UnknownCommand(CMD_BUTTON))
        );
    }

    #[test]
    fn test_host_command_roundtrip() {
        let command = HostCommand::Date {
            month: 12,
            day: 31,
            year: 1999,
        };
        let parsed = HostCommand::from_frame(&command.to_frame().unwrap()).unwrap();
        assert_eq!(command, parsed);
    }

    #[test]
    fn test_button_report_frame() {
        let f = DeviceMessage::Button(Button::Down).to_frame().unwrap();
        assert_eq!(f.code, CMD_BUTTON);
        assert_eq!(f.payload.as_slice(), &[2]);
        assert!(f.is_valid());
        assert_eq!(
            DeviceMessage::from_frame(&f),
            Ok(DeviceMessage::Button(Button::Down))
        );
    }

    #[test]
    fn test_button_none_is_not_reported() {
        assert!(DeviceMessage::Button(Button::None).to_frame().is_none());
    }
}
