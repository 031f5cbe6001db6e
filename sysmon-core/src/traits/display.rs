//! Character display trait
//!
//! The dispatcher renders through this trait only, so the layout logic can
//! be tested against an in-memory grid instead of a real controller.

/// Text-mode character display with a handful of user-defined glyphs
pub trait CharacterDisplay {
    /// Error type for display operations
    type Error;

    /// Visible characters per row
    fn columns(&self) -> u8;

    /// Visible rows
    fn rows(&self) -> u8;

    /// Blank the whole display and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the write position
    ///
    /// Rows past the last one are clamped to the last row.
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Write one character code at the cursor and advance it
    ///
    /// Codes 0-7 select the user-defined glyphs.
    fn write_char(&mut self, code: u8) -> Result<(), Self::Error>;

    /// Write a run of character codes
    fn print(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        for &code in text {
            self.write_char(code)?;
        }
        Ok(())
    }

    /// Store a 5x8 bitmap in glyph slot `index` (masked to 0-7)
    fn define_glyph(&mut self, index: u8, bitmap: &[u8; 8]) -> Result<(), Self::Error>;
}

/// Helpers for fixed-width fields
pub trait DisplayExt: CharacterDisplay {
    /// Write `text` and pad with spaces to `width`
    ///
    /// Text longer than `width` is truncated, so a field never spills into
    /// its neighbour and a shorter value leaves no stale characters.
    fn print_field(&mut self, text: &[u8], width: u8) -> Result<(), Self::Error> {
        let width = usize::from(width);
        let shown = text.len().min(width);
        self.print(&text[..shown])?;
        for _ in shown..width {
            self.write_char(b' ')?;
        }
        Ok(())
    }

    /// Same as [`DisplayExt::print_field`] for ASCII strings
    fn print_str_field(&mut self, text: &str, width: u8) -> Result<(), Self::Error> {
        self.print_field(text.as_bytes(), width)
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay + ?Sized> DisplayExt for T {}
