//! sysmon-lcd - Telemetry Character LCD Firmware
//!
//! Drives a 16x2 HD44780 keypad shield from an RP2040. The host streams
//! system telemetry over UART; the device renders it and reports keypad
//! presses back so the host knows which page to send.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sysmon_core::config::{KeypadConfig, PanelConfig};
use sysmon_core::dispatch::load_glyphs;
use sysmon_drivers::keypad::AnalogKeypad;
use sysmon_drivers::lcd::{Hd44780, Hd44780Pins};
use sysmon_hal::UartConfig;
use sysmon_hal_rp2040::{gpio_to_uart, to_rp_config, AdcChannel, HostUartTx, KeypadAdc};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Board wiring. Changing a pin here also means changing the peripheral
// taken from `p` below.
const UART_TX_GPIO: u8 = 0;
const UART_RX_GPIO: u8 = 1;
const KEYPAD_GPIO: u8 = 26;

/// Shown until the host sends its first update
const BANNER: [&[u8]; 2] = [b"LCD Initialized", b"Press any key..."];
const BANNER_MS: u64 = 1000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("sysmon-lcd firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let panel = PanelConfig::default();
    let keypad_config = KeypadConfig::default();

    // LCD: D4-D7 on GP2-GP5, RS on GP6, E on GP7, backlight on GP10
    let pins = Hd44780Pins {
        rs: Output::new(p.PIN_6, Level::Low),
        enable: Output::new(p.PIN_7, Level::Low),
        d4: Output::new(p.PIN_2, Level::Low),
        d5: Output::new(p.PIN_3, Level::Low),
        d6: Output::new(p.PIN_4, Level::Low),
        d7: Output::new(p.PIN_5, Level::Low),
    };
    let mut lcd = Hd44780::new(pins, Delay).with_backlight(Output::new(p.PIN_10, Level::Low));

    if let Err(e) = lcd.initialize(panel.columns, panel.rows) {
        error!("LCD init failed: {:?}", e);
        return;
    }
    if let Err(e) = load_glyphs(&mut lcd) {
        error!("Glyph load failed: {:?}", e);
        return;
    }
    info!("LCD initialized ({}x{})", panel.columns, panel.rows);

    show_banner(&mut lcd).await;

    // Host link
    let link = UartConfig::default();
    match gpio_to_uart(UART_TX_GPIO) {
        Some(id) => info!(
            "Host link on {:?} (TX GP{}, RX GP{}), {} baud",
            id, UART_TX_GPIO, UART_RX_GPIO, link.baudrate
        ),
        None => warn!("GP{} is not a UART pin", UART_TX_GPIO),
    }

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, to_rp_config(&link));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    // Keypad ladder
    if AdcChannel::from_gpio(KEYPAD_GPIO).is_none() {
        warn!("GP{} has no ADC channel", KEYPAD_GPIO);
    }
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);
    let keypad = AnalogKeypad::new(KeypadAdc::new(adc, channel), keypad_config);

    info!("Spawning tasks...");

    spawner.spawn(tasks::uart_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::control_task(
            lcd,
            keypad,
            HostUartTx::new(tx),
            panel,
            keypad_config.sample_period_ms,
        ))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

async fn show_banner(lcd: &mut tasks::Lcd) {
    for (row, line) in (0u8..).zip(BANNER) {
        if let Err(e) = lcd.set_cursor(row, 0).and_then(|_| lcd.print(line)) {
            warn!("Banner write failed: {:?}", e);
            return;
        }
    }

    Timer::after_millis(BANNER_MS).await;

    if let Err(e) = lcd.clear() {
        warn!("LCD clear failed: {:?}", e);
    }
}
