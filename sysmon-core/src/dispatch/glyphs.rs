//! Custom glyphs loaded at startup
//!
//! The controller has eight 5x8 glyph slots; five are used.

use crate::traits::CharacterDisplay;

pub const GLYPH_TEMPERATURE: u8 = 0;
pub const GLYPH_MEMORY: u8 = 1;
pub const GLYPH_CPU: u8 = 2;
pub const GLYPH_FAN_A: u8 = 3;
pub const GLYPH_FAN_B: u8 = 4;

/// A glyph slot and its bitmap (low 5 bits of each row are lit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CustomGlyph {
    pub index: u8,
    pub bitmap: [u8; 8],
}

/// Thermometer
const TEMPERATURE: [u8; 8] = [
    0b01110,
    0b01010,
    0b01010,
    0b01110,
    0b01110,
    0b11111,
    0b11111,
    0b01110,
];

/// RAM stick
const MEMORY: [u8; 8] = [
    0b01110,
    0b01011,
    0b01110,
    0b01111,
    0b01010,
    0b01111,
    0b01010,
    0b01111,
];

/// Chip corner
const CPU: [u8; 8] = [
    0b11000,
    0b10000,
    0b11011,
    0b00011,
    0b00010,
    0b00010,
    0b10100,
    0b11100,
];

// Two fan frames, blades mirrored
const FAN_A: [u8; 8] = [
    0b00000,
    0b01110,
    0b10011,
    0b10101,
    0b11001,
    0b01110,
    0b00000,
    0b00000,
];

const FAN_B: [u8; 8] = [
    0b00000,
    0b01110,
    0b11001,
    0b10101,
    0b10011,
    0b01110,
    0b00000,
    0b00000,
];

/// Every glyph the layout refers to
pub const GLYPHS: [CustomGlyph; 5] = [
    CustomGlyph {
        index: GLYPH_TEMPERATURE,
        bitmap: TEMPERATURE,
    },
    CustomGlyph {
        index: GLYPH_MEMORY,
        bitmap: MEMORY,
    },
    CustomGlyph {
        index: GLYPH_CPU,
        bitmap: CPU,
    },
    CustomGlyph {
        index: GLYPH_FAN_A,
        bitmap: FAN_A,
    },
    CustomGlyph {
        index: GLYPH_FAN_B,
        bitmap: FAN_B,
    },
];

/// Store all glyphs and leave the cursor at the top-left cell
pub fn load_glyphs<D: CharacterDisplay + ?Sized>(display: &mut D) -> Result<(), D::Error> {
    for glyph in &GLYPHS {
        display.define_glyph(glyph.index, &glyph.bitmap)?;
    }
    // Glyph writes leave the controller addressing glyph memory
    display.set_cursor(0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::GridDisplay;

    #[test]
    fn test_load_glyphs() {
        let mut display = GridDisplay::new(16, 2);
        load_glyphs(&mut display).unwrap();

        assert_eq!(display.glyphs[0], TEMPERATURE);
        assert_eq!(display.glyphs[4], FAN_B);
        assert_eq!(display.cursor, (0, 0));
    }

    #[test]
    fn test_bitmaps_are_five_pixels_wide() {
        for glyph in &GLYPHS {
            assert!(glyph.index < 8);
            assert!(glyph.bitmap.iter().all(|row| row & !0x1F == 0));
        }
    }
}
