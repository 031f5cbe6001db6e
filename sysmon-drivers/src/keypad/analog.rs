//! Resistor-ladder keypad
//!
//! All five shield buttons share one ADC channel. Each poll takes one
//! reading and feeds it through the debouncer.

use sysmon_core::config::KeypadConfig;
use sysmon_core::keypad::{ButtonDebouncer, SampleError};
use sysmon_hal::AnalogInput;
use sysmon_protocol::Button;

/// Keypad errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadError {
    /// Conversion failed or returned a value above full scale
    SensorFault,
}

impl From<SampleError> for KeypadError {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::SensorFault => KeypadError::SensorFault,
        }
    }
}

/// Debounced keypad on one analog input
pub struct AnalogKeypad<ADC> {
    adc: ADC,
    debouncer: ButtonDebouncer,
    last_raw: Option<u16>,
}

impl<ADC: AnalogInput> AnalogKeypad<ADC> {
    /// Create a keypad reader
    ///
    /// The converter's own full scale replaces `config.max_scale`, and the
    /// bands must still cover it.
    pub fn new(adc: ADC, config: KeypadConfig) -> Self {
        let config = KeypadConfig {
            max_scale: adc.max_scale(),
            ..config
        };
        debug_assert!(
            config.is_valid(),
            "keypad bands do not cover the converter's full scale"
        );
        Self {
            adc,
            debouncer: ButtonDebouncer::new(config),
            last_raw: None,
        }
    }

    /// Take one reading at `now_ms`
    ///
    /// Returns the new stable button when it changes. A failed conversion
    /// leaves the debouncer untouched.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<Button>, KeypadError> {
        let raw = self.adc.read().map_err(|_| KeypadError::SensorFault)?;
        self.last_raw = Some(raw);
        Ok(self.debouncer.sample(raw, now_ms)?)
    }

    /// Last stable button
    pub fn stable(&self) -> Button {
        self.debouncer.stable()
    }

    /// Most recent raw reading, for diagnostics
    pub fn last_raw(&self) -> Option<u16> {
        self.last_raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of readings, then repeats the last one
    struct ScriptedAdc {
        readings: Vec<Result<u16, ()>>,
        next: usize,
    }

    impl ScriptedAdc {
        fn new(readings: Vec<Result<u16, ()>>) -> Self {
            Self { readings, next: 0 }
        }
    }

    impl AnalogInput for ScriptedAdc {
        type Error = ();

        fn read(&mut self) -> Result<u16, Self::Error> {
            let index = self.next.min(self.readings.len() - 1);
            self.next += 1;
            self.readings[index]
        }
    }

    /// 13-bit converter, wider than the default bands
    struct WideAdc;

    impl AnalogInput for WideAdc {
        type Error = ();

        fn read(&mut self) -> Result<u16, Self::Error> {
            Ok(0)
        }

        fn max_scale(&self) -> u16 {
            8191
        }
    }

    #[test]
    #[should_panic(expected = "full scale")]
    fn test_bands_must_cover_adc_scale() {
        let _ = AnalogKeypad::new(WideAdc, KeypadConfig::default());
    }

    #[test]
    fn test_press_select() {
        let adc = ScriptedAdc::new(vec![Ok(820)]);
        let mut keypad = AnalogKeypad::new(adc, KeypadConfig::default());

        let changes: Vec<Button> = (0..10)
            .filter_map(|i| keypad.poll(i * 10).unwrap())
            .collect();

        assert_eq!(changes, vec![Button::Select]);
        assert_eq!(keypad.stable(), Button::Select);
        assert_eq!(keypad.last_raw(), Some(820));
    }

    #[test]
    fn test_read_error_is_sensor_fault() {
        let adc = ScriptedAdc::new(vec![Ok(50), Err(())]);
        let mut keypad = AnalogKeypad::new(adc, KeypadConfig::default());

        assert_eq!(keypad.poll(0), Ok(None));
        assert_eq!(keypad.poll(10), Err(KeypadError::SensorFault));
        assert_eq!(keypad.last_raw(), Some(50));
    }

    #[test]
    fn test_over_scale_is_sensor_fault() {
        let adc = ScriptedAdc::new(vec![Ok(4096)]);
        let mut keypad = AnalogKeypad::new(adc, KeypadConfig::default());

        assert_eq!(keypad.poll(0), Err(KeypadError::SensorFault));
        assert_eq!(keypad.stable(), Button::None);
    }
}
