//! Control task
//!
//! Every sample period this task:
//! - polls the keypad and switches pages on a new press
//! - reassembles frames from the receive queue and renders them
//! - reports queue overflow and dropped frames
//!
//! It is the only owner of the display, so no locking is needed around
//! LCD writes.

use defmt::*;
use embassy_rp::adc::Async;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Duration, Instant, Ticker};

use sysmon_core::config::PanelConfig;
use sysmon_core::dispatch::Dispatch;
use sysmon_core::link::HostLink;
use sysmon_drivers::keypad::AnalogKeypad;
use sysmon_drivers::lcd::Hd44780;
use sysmon_hal_rp2040::{HostUartTx, KeypadAdc};

use crate::channels::{with_rx_queue, SharedRxQueue};

/// HD44780 on RP2040 GPIO
pub type Lcd = Hd44780<Output<'static>, Delay>;

/// Keypad ladder on the RP2040 ADC
pub type Keypad = AnalogKeypad<KeypadAdc<'static, Async>>;

/// Frames handled per tick before yielding back to the keypad
const MAX_FRAMES_PER_TICK: usize = 8;

/// Control task - owns the display, keypad and host transmitter
#[embassy_executor::task]
pub async fn control_task(
    mut lcd: Lcd,
    mut keypad: Keypad,
    mut tx: HostUartTx,
    panel: PanelConfig,
    sample_period_ms: u32,
) {
    info!("Control task started");

    let mut link = HostLink::new(panel);
    let mut queue = SharedRxQueue;

    let mut ticker = Ticker::every(Duration::from_millis(sample_period_ms as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Wraps after ~49 days; the debouncer uses wrapping arithmetic
        let now_ms = start.elapsed().as_millis() as u32;

        match keypad.poll(now_ms) {
            Ok(Some(button)) => {
                match link.button_changed(button, &mut lcd, &mut queue, &mut tx) {
                    Ok(true) => {
                        info!("Button {} (raw {:?})", button.letter(), keypad.last_raw());
                    }
                    Ok(false) => {
                        trace!("Button released");
                    }
                    Err(e) => {
                        warn!("Page switch failed: {:?}", e);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Keypad sample failed: {:?}", e);
            }
        }

        for _ in 0..MAX_FRAMES_PER_TICK {
            match link.poll(&mut lcd, &mut queue, &mut tx) {
                Ok(Some(outcome)) => log_outcome(outcome),
                Ok(None) => break,
                Err(e) => {
                    warn!("Frame handling failed: {:?}", e);
                }
            }
        }

        let overflow = with_rx_queue(|queue| queue.take_dropped());
        if overflow > 0 {
            warn!("RX queue full, {} bytes dropped", overflow);
        }

        let dropped = link.take_dropped();
        if dropped > 0 {
            debug!("{} frames dropped", dropped);
        }
    }
}

fn log_outcome(outcome: Dispatch) {
    match outcome {
        Dispatch::Rendered(kind) => {
            trace!("Rendered {:?}", kind);
        }
        Dispatch::Ready => {
            info!("Host ready");
        }
        Dispatch::OffPanel(kind) => {
            debug!("{:?} slot is off the panel", kind);
        }
        Dispatch::Dropped(reason) => {
            debug!("Frame dropped: {:?}", reason);
        }
    }
}
