//! ESP32 firmware-specific modules for the gasmeter
//!
//! This crate contains hardware-specific code that cannot compile on desktop
//! targets: the esp-hal ADC adapter for the MQ-7 input and the RTT console.

#![no_std]

pub mod adc;
pub mod console;
