//! HD44780 character LCD driver (4-bit parallel)
//!
//! Drives the controller through six GPIO lines: RS, E and D4-D7. The
//! R/W line is tied low on the keypad shield, so the controller is never
//! read. Every wait is a fixed busy delay and the cached [`DisplayState`]
//! is the only record of what the controller has been told.
//!
//! Works with SPLC780D and other HD44780 clones.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use sysmon_core::traits::CharacterDisplay;

use super::command::*;

/// Wait after power-up before talking to the controller (datasheet: >40 ms)
pub const POWER_UP_DELAY_MS: u32 = 50;
/// Wait after the first two reset nibbles (datasheet: >4.1 ms)
pub const RESET_WAIT_MS: u32 = 5;
/// Wait after the third reset nibble (datasheet: >100 µs)
pub const RESET_SHORT_WAIT_US: u32 = 150;
/// Enable setup and pulse width
pub const ENABLE_PULSE_US: u32 = 1;
/// Execution time of a regular instruction (datasheet: 37 µs)
pub const COMMAND_SETTLE_US: u32 = 100;
/// Execution time of clear and return-home (datasheet: 1.52 ms)
pub const LONG_COMMAND_MS: u32 = 2;

/// LCD driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError<E> {
    /// A control line could not be driven to its idle level before init
    DeviceNotReady,
    /// A GPIO write failed mid-transfer
    Pin(E),
}

/// Controller state as last written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Bus width, line count and font
    pub function_flags: u8,
    /// Display on, cursor, blink
    pub control_flags: u8,
    /// Text direction and autoscroll
    pub entry_mode_flags: u8,
    /// Row of the last cursor move
    pub current_row: u8,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            function_flags: MODE_4BIT | LINES_2 | FONT_5X8,
            control_flags: DISPLAY_ON,
            entry_mode_flags: ENTRY_LEFT | ENTRY_SHIFT_DECREMENT,
            current_row: 0,
        }
    }
}

/// The six bus lines
pub struct Hd44780Pins<P> {
    /// Register select: low for instructions, high for data
    pub rs: P,
    /// Enable strobe, latched on the falling edge
    pub enable: P,
    pub d4: P,
    pub d5: P,
    pub d6: P,
    pub d7: P,
}

/// HD44780 driver
pub struct Hd44780<P, D> {
    pins: Hd44780Pins<P>,
    backlight: Option<P>,
    delay: D,
    state: DisplayState,
    columns: u8,
    rows: u8,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a driver for a 16x2 panel; call [`initialize`](Self::initialize) before use
    pub fn new(pins: Hd44780Pins<P>, delay: D) -> Self {
        Self {
            pins,
            backlight: None,
            delay,
            state: DisplayState::default(),
            columns: 16,
            rows: 2,
        }
    }

    /// Attach a backlight enable line (switched on by `initialize`)
    pub fn with_backlight(mut self, pin: P) -> Self {
        self.backlight = Some(pin);
        self
    }

    /// Cached controller state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Run the power-on reset sequence and configure the panel
    ///
    /// `rows` is clamped to 1-4.
    pub fn initialize(&mut self, columns: u8, rows: u8) -> Result<(), LcdError<P::Error>> {
        self.drive_idle().map_err(|_| LcdError::DeviceNotReady)?;

        let rows = rows.clamp(1, ROW_OFFSETS.len() as u8);
        let lines = if rows > 1 { LINES_2 } else { LINES_1 };
        let target = DisplayState {
            function_flags: MODE_4BIT | lines | FONT_5X8,
            ..DisplayState::default()
        };

        if let Some(backlight) = self.backlight.as_mut() {
            backlight.set_high().map_err(LcdError::Pin)?;
        }

        self.delay.delay_ms(POWER_UP_DELAY_MS);

        // Whatever mode the controller woke up in, three 8-bit function
        // sets put it in 8-bit mode, then one nibble selects 4-bit mode.
        self.write_nibble(RESET_NIBBLE)?;
        self.delay.delay_ms(RESET_WAIT_MS);
        self.write_nibble(RESET_NIBBLE)?;
        self.delay.delay_ms(RESET_WAIT_MS);
        self.write_nibble(RESET_NIBBLE)?;
        self.delay.delay_us(RESET_SHORT_WAIT_US);
        self.write_nibble(FOUR_BIT_NIBBLE)?;

        self.write_command(FUNCTION_SET | target.function_flags)?;
        self.state.function_flags = target.function_flags;
        self.columns = columns;
        self.rows = rows;

        self.write_command(DISPLAY_CONTROL | target.control_flags)?;
        self.state.control_flags = target.control_flags;

        self.clear()?;

        self.write_command(ENTRY_MODE_SET | target.entry_mode_flags)?;
        self.state.entry_mode_flags = target.entry_mode_flags;
        Ok(())
    }

    /// Send an instruction byte
    pub fn write_command(&mut self, byte: u8) -> Result<(), LcdError<P::Error>> {
        self.pins.rs.set_low().map_err(LcdError::Pin)?;
        self.write_byte(byte)
    }

    /// Send a data byte to DDRAM or CGRAM, whichever was addressed last
    pub fn write_data(&mut self, byte: u8) -> Result<(), LcdError<P::Error>> {
        self.pins.rs.set_high().map_err(LcdError::Pin)?;
        self.write_byte(byte)
    }

    /// Blank the display and home the cursor
    pub fn clear(&mut self) -> Result<(), LcdError<P::Error>> {
        self.write_command(CLEAR_DISPLAY)?;
        self.delay.delay_ms(LONG_COMMAND_MS);
        self.state.current_row = 0;
        Ok(())
    }

    /// Home the cursor and undo any display shift
    pub fn return_home(&mut self) -> Result<(), LcdError<P::Error>> {
        self.write_command(RETURN_HOME)?;
        self.delay.delay_ms(LONG_COMMAND_MS);
        self.state.current_row = 0;
        Ok(())
    }

    /// Move the cursor; rows past the last one are clamped
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), LcdError<P::Error>> {
        let row = row.min(self.rows - 1);
        let address = col.wrapping_add(ROW_OFFSETS[usize::from(row)]);
        self.write_command(SET_DDRAM_ADDR | (address & 0x7F))?;
        self.state.current_row = row;
        Ok(())
    }

    pub fn set_display_on(&mut self, on: bool) -> Result<(), LcdError<P::Error>> {
        self.update_control(DISPLAY_ON, on)
    }

    pub fn set_cursor_on(&mut self, on: bool) -> Result<(), LcdError<P::Error>> {
        self.update_control(CURSOR_ON, on)
    }

    pub fn set_blink_on(&mut self, on: bool) -> Result<(), LcdError<P::Error>> {
        self.update_control(BLINK_ON, on)
    }

    /// Text direction: left-to-right advances the cursor rightwards
    pub fn set_left_to_right(&mut self, left_to_right: bool) -> Result<(), LcdError<P::Error>> {
        self.update_entry_mode(ENTRY_LEFT, left_to_right)
    }

    /// Shift the whole display on every write instead of moving the cursor
    pub fn set_autoscroll(&mut self, on: bool) -> Result<(), LcdError<P::Error>> {
        self.update_entry_mode(ENTRY_SHIFT_INCREMENT, on)
    }

    /// Shift the visible window one cell left without touching DDRAM
    pub fn scroll_display_left(&mut self) -> Result<(), LcdError<P::Error>> {
        self.write_command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_LEFT)
    }

    pub fn scroll_display_right(&mut self) -> Result<(), LcdError<P::Error>> {
        self.write_command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_RIGHT)
    }

    /// Switch the backlight; a no-op when no backlight line is attached
    pub fn set_backlight(&mut self, on: bool) -> Result<(), LcdError<P::Error>> {
        match self.backlight.as_mut() {
            Some(pin) => pin.set_state(PinState::from(on)).map_err(LcdError::Pin),
            None => Ok(()),
        }
    }

    /// Store a 5x8 glyph in CGRAM slot `index & 7`
    ///
    /// Leaves the controller addressing CGRAM; move the cursor before
    /// printing again.
    pub fn define_glyph(&mut self, index: u8, bitmap: &[u8; 8]) -> Result<(), LcdError<P::Error>> {
        self.write_command(SET_CGRAM_ADDR | ((index & 0x07) << 3))?;
        for &row in bitmap {
            self.write_data(row)?;
        }
        Ok(())
    }

    pub fn write_char(&mut self, code: u8) -> Result<(), LcdError<P::Error>> {
        self.write_data(code)
    }

    pub fn print(&mut self, text: &[u8]) -> Result<(), LcdError<P::Error>> {
        for &code in text {
            self.write_data(code)?;
        }
        Ok(())
    }

    // The cache only changes once the controller has accepted the command
    fn update_control(&mut self, flag: u8, on: bool) -> Result<(), LcdError<P::Error>> {
        let flags = with_flag(self.state.control_flags, flag, on);
        self.write_command(DISPLAY_CONTROL | flags)?;
        self.state.control_flags = flags;
        Ok(())
    }

    fn update_entry_mode(&mut self, flag: u8, on: bool) -> Result<(), LcdError<P::Error>> {
        let flags = with_flag(self.state.entry_mode_flags, flag, on);
        self.write_command(ENTRY_MODE_SET | flags)?;
        self.state.entry_mode_flags = flags;
        Ok(())
    }

    fn drive_idle(&mut self) -> Result<(), P::Error> {
        self.pins.rs.set_low()?;
        self.pins.enable.set_low()?;
        self.pins.d4.set_low()?;
        self.pins.d5.set_low()?;
        self.pins.d6.set_low()?;
        self.pins.d7.set_low()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LcdError<P::Error>> {
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), LcdError<P::Error>> {
        let bit = |n: u8| PinState::from(nibble & (1 << n) != 0);
        self.pins.d4.set_state(bit(0)).map_err(LcdError::Pin)?;
        self.pins.d5.set_state(bit(1)).map_err(LcdError::Pin)?;
        self.pins.d6.set_state(bit(2)).map_err(LcdError::Pin)?;
        self.pins.d7.set_state(bit(3)).map_err(LcdError::Pin)?;
        self.strobe()
    }

    fn strobe(&mut self) -> Result<(), LcdError<P::Error>> {
        self.pins.enable.set_low().map_err(LcdError::Pin)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.pins.enable.set_high().map_err(LcdError::Pin)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.pins.enable.set_low().map_err(LcdError::Pin)?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }
}

fn with_flag(flags: u8, flag: u8, on: bool) -> u8 {
    if on {
        flags | flag
    } else {
        flags & !flag
    }
}

impl<P, D> CharacterDisplay for Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = LcdError<P::Error>;

    fn columns(&self) -> u8 {
        self.columns
    }

    fn rows(&self) -> u8 {
        self.rows
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        Hd44780::clear(self)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        Hd44780::set_cursor(self, row, col)
    }

    fn write_char(&mut self, code: u8) -> Result<(), Self::Error> {
        Hd44780::write_char(self, code)
    }

    fn print(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        Hd44780::print(self, text)
    }

    fn define_glyph(&mut self, index: u8, bitmap: &[u8; 8]) -> Result<(), Self::Error> {
        Hd44780::define_glyph(self, index, bitmap)
    }
}
