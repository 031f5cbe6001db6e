//! RP2040-specific HAL for the sysmon-lcd firmware
//!
//! This crate provides RP2040 implementations of the `sysmon-hal` traits:
//! - ADC channel sampling for the keypad ladder
//! - Buffered UART transmit for host reports

#![no_std]

pub mod adc;
pub mod uart;

pub use adc::{AdcChannel, KeypadAdc};
pub use uart::{gpio_to_uart, to_rp_config, HostUartTx, UartId};
