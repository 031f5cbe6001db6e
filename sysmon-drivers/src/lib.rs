//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sysmon-core for the keypad shield hardware:
//!
//! - HD44780-compatible character LCD over a 4-bit parallel bus
//! - Resistor-ladder keypad on one ADC channel

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod keypad;
pub mod lcd;
