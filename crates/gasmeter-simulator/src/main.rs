//! Desktop simulator for the handheld gasmeter.
//!
//! Runs the gasmeter-core sampler on the host with a synthetic MQ-7 input and
//! prints report lines to stdout. Log output goes through `env_logger`, so
//! `RUST_LOG=debug` shows every raw read.
//!
//! # Usage
//!
//! | Command                               | Variant                         |
//! |---------------------------------------|---------------------------------|
//! | `gasmeter-simulator`                  | Sensor (1 s interval)           |
//! | `gasmeter-simulator placeholder`      | Placeholder (2 s interval)      |
//!
//! Stop with Ctrl-C.

use std::f64::consts::TAU;
use std::time::Duration;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use log::{info, warn};

use gasmeter_core::config::{ADC_MAX_RAW, AdcSettings, SamplerConfig, Variant};
use gasmeter_core::report::ReportSink;
use gasmeter_core::sampling::Sampler;
use gasmeter_core::sensors::{AnalogInput, Mq7Sensor, PlaceholderSensor, SensorError};

/// Length of one simulated MQ-7 heater cycle, in reads.
///
/// The real sensor alternates 60 s at 5 V and 90 s at 1.4 V.
const HEATER_CYCLE_READS: u64 = 150;

/// Every n-th read fails to exercise the error path.
const FAULT_EVERY: u64 = 97;

/// Never raised; the simulator runs until interrupted like the device does.
static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Generates raw ADC counts resembling an MQ-7 in clean air with a slow CO puff.
struct SyntheticMq7 {
    reads: u64,
    configured: Option<AdcSettings>,
}

impl SyntheticMq7 {
    fn new() -> Self {
        Self {
            reads: 0,
            configured: None,
        }
    }

    fn waveform(&self) -> u16 {
        let t = self.reads as f64;

        // Heater phase: higher baseline while the heater runs at full voltage
        let phase = self.reads % HEATER_CYCLE_READS;
        let baseline = if phase < 60 { 900.0 } else { 1400.0 };

        // Gas concentration drifts up and down over a long period
        let puff = 600.0 * (0.5 - 0.5 * (TAU * t / 600.0).cos());
        let ripple = 25.0 * (t / 3.0).sin();

        (baseline + puff + ripple).clamp(0.0, ADC_MAX_RAW as f64) as u16
    }
}

impl AnalogInput for SyntheticMq7 {
    fn configure(&mut self, settings: &AdcSettings) -> Result<(), SensorError> {
        self.configured = Some(*settings);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<u16, SensorError> {
        if self.configured.is_none() {
            return Err(SensorError::NotConfigured {
                sensor: "synthetic MQ-7",
            });
        }

        self.reads += 1;
        if self.reads % FAULT_EVERY == 0 {
            return Err(SensorError::ReadFailed {
                sensor: "synthetic MQ-7",
                operation: "oneshot conversion",
                details: "simulated fault",
            });
        }

        Ok(self.waveform())
    }
}

/// Sleeps the thread for the requested time.
///
/// The simulator runs a single task, so blocking inside the future is fine and
/// keeps `block_on` from spinning through the interval.
struct ThreadDelay;

impl DelayNs for ThreadDelay {
    async fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }
}

struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

fn variant_from_args() -> Variant {
    match std::env::args().nth(1).as_deref() {
        None | Some("sensor") => Variant::Sensor,
        Some("placeholder") => Variant::Placeholder,
        Some(other) => {
            warn!("Unknown variant {other:?}, running the sensor variant");
            Variant::Sensor
        }
    }
}

fn main() {
    env_logger::init();
    info!("Starting gasmeter simulator");

    let config = SamplerConfig::new(variant_from_args());

    let summary = match config.variant {
        Variant::Sensor => {
            let sensor = Mq7Sensor::new(SyntheticMq7::new(), config.adc);
            let mut sampler = Sampler::new(sensor, StdoutSink, ThreadDelay, config);
            block_on(sampler.run(&SHUTDOWN))
        }
        Variant::Placeholder => {
            let mut sampler = Sampler::new(PlaceholderSensor, StdoutSink, ThreadDelay, config);
            block_on(sampler.run(&SHUTDOWN))
        }
    };

    info!("Simulator exiting: {summary:?}");
}
