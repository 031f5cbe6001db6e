//! Analog keypad configuration
//!
//! The keypad shield wires its five buttons into a resistor ladder read by
//! one ADC channel. Each button produces a voltage band; the table below
//! holds the upper bound of each band, ordered ascending.

use sysmon_protocol::Button;

/// Number of entries in the classification table (five buttons plus idle)
pub const BUTTON_RANGE_COUNT: usize = 6;

/// Time a raw reading must persist before it counts toward stability
pub const DEBOUNCE_HOLD_MS: u32 = 50;

/// Consistent readings needed after the hold time
pub const DEBOUNCE_MIN_CONSISTENT: u8 = 3;

/// Control loop sampling period
pub const SAMPLE_PERIOD_MS: u32 = 10;

/// Upper bound of one button's band (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonRange {
    /// Highest raw value that still maps to `button`
    pub upper: u16,
    pub button: Button,
}

impl ButtonRange {
    pub const fn new(upper: u16, button: Button) -> Self {
        Self { upper, button }
    }
}

/// Bands observed on the shield with a 12-bit converter
pub const DEFAULT_BUTTON_RANGES: [ButtonRange; BUTTON_RANGE_COUNT] = [
    ButtonRange::new(150, Button::Right),
    ButtonRange::new(650, Button::Up),
    ButtonRange::new(750, Button::Down),
    ButtonRange::new(800, Button::Left),
    ButtonRange::new(835, Button::Select),
    ButtonRange::new(4095, Button::None),
];

/// Keypad sampling and debounce parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadConfig {
    /// Classification table, ascending by `upper`
    pub ranges: [ButtonRange; BUTTON_RANGE_COUNT],
    /// Largest raw value a healthy converter can produce
    pub max_scale: u16,
    /// Hold time before readings count (ms)
    pub hold_ms: u32,
    /// Readings needed after the hold time to accept a button
    pub min_consistent: u8,
    /// Sampling period of the control loop (ms)
    pub sample_period_ms: u32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_BUTTON_RANGES,
            max_scale: 4095,
            hold_ms: DEBOUNCE_HOLD_MS,
            min_consistent: DEBOUNCE_MIN_CONSISTENT,
            sample_period_ms: SAMPLE_PERIOD_MS,
        }
    }
}

impl KeypadConfig {
    /// Check that bands ascend strictly and cover the full scale
    pub fn is_valid(&self) -> bool {
        let ascending = self
            .ranges
            .windows(2)
            .all(|pair| pair[0].upper < pair[1].upper);
        let covers_scale = self
            .ranges
            .last()
            .is_some_and(|last| last.upper >= self.max_scale);

        ascending && covers_scale && self.min_consistent > 0
    }
}
