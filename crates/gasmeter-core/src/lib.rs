//! Hardware-independent core library for the handheld gasmeter
//!
//! This crate contains all platform-agnostic logic for the gasmeter firmware:
//! the sample model and its voltage conversion, the sensor and analog input
//! traits, report formatting, and the sampler-reporter run loop.
//!
//! It is `#![no_std]` so it compiles on both the ESP32 target and desktop
//! hosts (for the simulator and tests).

#![no_std]

pub mod config;
pub mod report;
pub mod sample;
pub mod sampling;
pub mod sensors;
