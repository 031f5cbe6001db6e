//! Analog button debouncer
//!
//! Turns a stream of raw ladder readings into a stable button identity.
//! A reading only becomes stable once its identity has held for the hold
//! time *and* been seen a minimum number of times after that.
//!
//! ```text
//!   new identity ──► Holding ──(hold_ms elapsed)──► Counting ──(≥ min)──► Stable
//!        ▲              │                              │
//!        └──────────────┴──────── identity changes ────┘
//! ```
//!
//! Timestamps are a wrapping millisecond counter, so the debouncer keeps
//! working across the ~49 day rollover.

use sysmon_protocol::Button;

use crate::config::KeypadConfig;

/// Reasons a sample carries no information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Reading outside the converter's full-scale range
    SensorFault,
}

/// Debounce state machine for one analog keypad
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    config: KeypadConfig,
    /// Identity of the most recent in-range reading
    raw_candidate: Button,
    /// When `raw_candidate` was first seen, `None` before the first sample
    candidate_since: Option<u32>,
    /// Readings of `raw_candidate` since the hold time elapsed
    consistency_count: u8,
    /// Last identity reported as stable
    stable: Button,
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new(KeypadConfig::default())
    }
}

impl ButtonDebouncer {
    /// Create a debouncer that starts with no button pressed
    pub fn new(config: KeypadConfig) -> Self {
        Self {
            config,
            raw_candidate: Button::None,
            candidate_since: None,
            consistency_count: 0,
            stable: Button::None,
        }
    }

    /// Map a raw reading to a button using the configured bands
    ///
    /// The first band whose upper bound is not exceeded wins, so a value
    /// exactly on a boundary belongs to the lower button.
    pub fn classify(&self, raw: u16) -> Button {
        self.config
            .ranges
            .iter()
            .find(|range| raw <= range.upper)
            .map(|range| range.button)
            .unwrap_or(Button::None)
    }

    /// Feed one reading taken at `now_ms`
    ///
    /// Returns `Ok(Some(button))` only when the stable identity changes.
    /// An out-of-range reading is rejected without touching any state.
    pub fn sample(&mut self, raw: u16, now_ms: u32) -> Result<Option<Button>, SampleError> {
        if raw > self.config.max_scale {
            return Err(SampleError::SensorFault);
        }

        let identity = self.classify(raw);

        let since = match self.candidate_since {
            Some(since) if identity == self.raw_candidate => since,
            _ => {
                self.raw_candidate = identity;
                self.candidate_since = Some(now_ms);
                self.consistency_count = 0;
                return Ok(None);
            }
        };

        if now_ms.wrapping_sub(since) < self.config.hold_ms {
            return Ok(None);
        }

        self.consistency_count = self.consistency_count.saturating_add(1);
        if self.consistency_count >= self.config.min_consistent && identity != self.stable {
            self.stable = identity;
            return Ok(Some(identity));
        }

        Ok(None)
    }

    /// Last stable identity
    pub fn stable(&self) -> Button {
        self.stable
    }

    /// Identity of the most recent in-range reading, stable or not
    pub fn candidate(&self) -> Button {
        self.raw_candidate
    }

    /// Forget everything and return to the idle state
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PERIOD: u32 = 10;

    /// Feed `raw` `count` times starting at `start`, collecting changes
    fn feed(deb: &mut ButtonDebouncer, raw: u16, start: u32, count: u32) -> Vec<Button> {
        (0..count)
            .filter_map(|i| deb.sample(raw, start.wrapping_add(i * PERIOD)).unwrap())
            .collect()
    }

    #[test]
    fn test_classify_boundaries() {
        let deb = ButtonDebouncer::default();
        assert_eq!(deb.classify(0), Button::Right);
        assert_eq!(deb.classify(150), Button::Right);
        assert_eq!(deb.classify(151), Button::Up);
        assert_eq!(deb.classify(650), Button::Up);
        assert_eq!(deb.classify(750), Button::Down);
        assert_eq!(deb.classify(800), Button::Left);
        assert_eq!(deb.classify(835), Button::Select);
        assert_eq!(deb.classify(836), Button::None);
        assert_eq!(deb.classify(4095), Button::None);
    }

    #[test]
    fn test_right_after_ten_samples() {
        let mut deb = ButtonDebouncer::default();
        let changes = feed(&mut deb, 50, 0, 10);

        assert_eq!(changes, vec![Button::Right]);
        assert_eq!(deb.stable(), Button::Right);
    }

    #[test]
    fn test_needs_hold_and_count() {
        let mut deb = ButtonDebouncer::default();
        // t = 0..=60: hold reached at 50, only two counted readings
        assert!(feed(&mut deb, 50, 0, 7).is_empty());
        assert_eq!(deb.stable(), Button::None);

        // Third counted reading at t = 70
        assert_eq!(deb.sample(50, 70), Ok(Some(Button::Right)));
    }

    #[test]
    fn test_stable_reported_once() {
        let mut deb = ButtonDebouncer::default();
        let changes = feed(&mut deb, 50, 0, 50);
        assert_eq!(changes, vec![Button::Right]);
    }

    #[test]
    fn test_release_reports_none() {
        let mut deb = ButtonDebouncer::default();
        feed(&mut deb, 50, 0, 10);
        let changes = feed(&mut deb, 4000, 100, 10);

        assert_eq!(changes, vec![Button::None]);
        assert_eq!(deb.stable(), Button::None);
    }

    #[test]
    fn test_out_of_range_is_sensor_fault() {
        let mut deb = ButtonDebouncer::default();
        feed(&mut deb, 50, 0, 10);

        assert_eq!(deb.sample(4096, 100), Err(SampleError::SensorFault));
        assert_eq!(deb.sample(u16::MAX, 110), Err(SampleError::SensorFault));
        assert_eq!(deb.stable(), Button::Right);
        assert_eq!(deb.candidate(), Button::Right);
    }

    #[test]
    fn test_isolated_fault_does_not_reset_hold() {
        let mut deb = ButtonDebouncer::default();
        feed(&mut deb, 700, 0, 6);
        assert_eq!(deb.sample(9999, 60), Err(SampleError::SensorFault));
        // Hold timer kept running through the fault
        assert_eq!(deb.sample(700, 70), Ok(None));
        assert_eq!(deb.sample(700, 80), Ok(Some(Button::Down)));
    }

    #[test]
    fn test_timer_wraps() {
        let mut deb = ButtonDebouncer::default();
        let start = u32::MAX - 30;
        let changes = feed(&mut deb, 790, start, 10);
        assert_eq!(changes, vec![Button::Left]);
    }

    #[test]
    fn test_reset() {
        let mut deb = ButtonDebouncer::default();
        feed(&mut deb, 50, 0, 10);
        deb.reset();
        assert_eq!(deb.stable(), Button::None);
        assert_eq!(deb.candidate(), Button::None);
    }

    proptest! {
        #[test]
        fn prop_isolated_fault_never_changes_stable(
            raw in 0u16..=4095,
            bad in 4096u16..=u16::MAX,
            settle in 10u32..40,
        ) {
            let mut deb = ButtonDebouncer::default();
            feed(&mut deb, raw, 0, settle);
            let before = deb.stable();

            prop_assert_eq!(deb.sample(bad, settle * PERIOD), Err(SampleError::SensorFault));
            prop_assert_eq!(deb.stable(), before);
        }

        #[test]
        fn prop_fast_oscillation_never_stabilizes(
            right in 0u16..=150,
            up in 151u16..=650,
            runs in proptest::collection::vec(1u32..=4, 1..60),
        ) {
            // Each run is shorter than the hold time at a 10 ms period
            let mut deb = ButtonDebouncer::default();
            let mut now = 0u32;
            for (i, run) in runs.iter().enumerate() {
                let raw = if i % 2 == 0 { right } else { up };
                for _ in 0..*run {
                    prop_assert_eq!(deb.sample(raw, now), Ok(None));
                    now += PERIOD;
                }
            }
            prop_assert_eq!(deb.stable(), Button::None);
        }
    }
}
