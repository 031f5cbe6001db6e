//! HD44780 instruction set
//!
//! Each instruction is a base opcode ORed with its flag bits.

// Instructions
pub const CLEAR_DISPLAY: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE_SET: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const CURSOR_SHIFT: u8 = 0x10;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_CGRAM_ADDR: u8 = 0x40;
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags
pub const ENTRY_RIGHT: u8 = 0x00;
pub const ENTRY_LEFT: u8 = 0x02;
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;
pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

// Display control flags
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const BLINK_ON: u8 = 0x01;

// Cursor/display shift flags
pub const DISPLAY_MOVE: u8 = 0x08;
pub const MOVE_RIGHT: u8 = 0x04;
pub const MOVE_LEFT: u8 = 0x00;

// Function set flags
pub const MODE_8BIT: u8 = 0x10;
pub const MODE_4BIT: u8 = 0x00;
pub const LINES_2: u8 = 0x08;
pub const LINES_1: u8 = 0x00;
pub const FONT_5X10: u8 = 0x04;
pub const FONT_5X8: u8 = 0x00;

/// Nibble that selects 8-bit mode during the reset sequence
pub const RESET_NIBBLE: u8 = 0x03;
/// Nibble that switches to 4-bit mode
pub const FOUR_BIT_NIBBLE: u8 = 0x02;

/// DDRAM address of the first cell of each row
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];
