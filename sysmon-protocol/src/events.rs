//! Keypad buttons as reported to the host

/// Button on the analog keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// No button pressed
    #[default]
    None,
    Right,
    Up,
    Down,
    Left,
    Select,
}

// Wire format values
const BUTTON_RIGHT: u8 = 0x00;
const BUTTON_UP: u8 = 0x01;
const BUTTON_DOWN: u8 = 0x02;
const BUTTON_LEFT: u8 = 0x03;
const BUTTON_SELECT: u8 = 0x04;

impl Button {
    /// Parse a button from its wire index
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            BUTTON_RIGHT => Some(Button::Right),
            BUTTON_UP => Some(Button::Up),
            BUTTON_DOWN => Some(Button::Down),
            BUTTON_LEFT => Some(Button::Left),
            BUTTON_SELECT => Some(Button::Select),
            _ => None,
        }
    }

    /// Wire index, or `None` for [`Button::None`] which is never reported
    pub fn index(self) -> Option<u8> {
        match self {
            Button::None => None,
            Button::Right => Some(BUTTON_RIGHT),
            Button::Up => Some(BUTTON_UP),
            Button::Down => Some(BUTTON_DOWN),
            Button::Left => Some(BUTTON_LEFT),
            Button::Select => Some(BUTTON_SELECT),
        }
    }

    /// Returns true if an actual key is held
    pub fn is_pressed(self) -> bool {
        self != Button::None
    }

    /// Single-letter name used in diagnostics
    pub fn letter(self) -> char {
        match self {
            Button::None => 'N',
            Button::Right => 'R',
            Button::Up => 'U',
            Button::Down => 'D',
            Button::Left => 'L',
            Button::Select => 'S',
        }
    }
}
