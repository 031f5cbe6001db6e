//! ADC channel sampling
//!
//! RP2040 has a single 12-bit ADC. Channels 0-3 sit on GPIO26-29; the
//! keypad ladder needs one of them.

use embassy_rp::adc::{self, Adc, Channel, Mode};
use sysmon_hal::AnalogInput;

/// Full-scale reading of the 12-bit converter
pub const ADC_MAX_SCALE: u16 = 4095;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }
}

/// Keypad ladder input: one ADC plus the channel the ladder is wired to
pub struct KeypadAdc<'d, M: Mode> {
    adc: Adc<'d, M>,
    channel: Channel<'d>,
}

impl<'d, M: Mode> KeypadAdc<'d, M> {
    /// Wrap an initialized ADC and channel
    pub fn new(adc: Adc<'d, M>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl<M: Mode> AnalogInput for KeypadAdc<'_, M> {
    type Error = adc::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.adc.blocking_read(&mut self.channel)
    }

    fn max_scale(&self) -> u16 {
        ADC_MAX_SCALE
    }
}
