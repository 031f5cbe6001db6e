//! Analog input abstraction
//!
//! The keypad is a resistor ladder on one ADC channel; this is all the
//! board-agnostic code needs from the converter.

/// Single analog channel
pub trait AnalogInput {
    /// Error type for conversions
    type Error;

    /// Take one blocking sample
    ///
    /// The raw value is in `0..=max_scale()` on a healthy channel.
    fn read(&mut self) -> Result<u16, Self::Error>;

    /// Full-scale raw value of this converter
    fn max_scale(&self) -> u16 {
        4095
    }
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    type Error = T::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        (**self).read()
    }

    fn max_scale(&self) -> u16 {
        (**self).max_scale()
    }
}
