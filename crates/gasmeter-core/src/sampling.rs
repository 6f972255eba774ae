//! The sampler-reporter loop
//!
//! Acquires one reading per interval from a [`Sensor`], formats it, and hands
//! the line to a [`ReportSink`]. The loop runs until the shutdown signal is
//! raised; on hardware nothing raises it, so it runs until reset.

use core::fmt::Display;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use log::{error, info};

use crate::config::SamplerConfig;
use crate::report::{ReadFailure, ReportSink, format_line};
use crate::sensors::Sensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Configuring,
    Sampling,
    Stopped,
}

/// Counters returned when a run stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Iterations whose read succeeded
    pub reports: u32,
    /// Iterations whose read returned an error
    pub failures: u32,
}

/// Periodic sampler driving one sensor.
///
/// # Type Parameters
/// - `S`: the sensor, whose readings render as report lines
/// - `K`: where report lines go
/// - `D`: the delay used between iterations (`embassy_time::Delay` on hardware)
pub struct Sampler<S, K, D> {
    sensor: S,
    sink: K,
    delay: D,
    config: SamplerConfig,
    state: RunState,
}

impl<S, K, D> Sampler<S, K, D>
where
    S: Sensor,
    S::Reading: Display,
    K: ReportSink,
    D: DelayNs,
{
    pub fn new(sensor: S, sink: K, delay: D, config: SamplerConfig) -> Self {
        Self {
            sensor,
            sink,
            delay,
            config,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn into_parts(self) -> (S, K, D) {
        (self.sensor, self.sink, self.delay)
    }

    /// Emit the banner and configure the sensor once.
    ///
    /// A configuration failure is logged and left for the first read to retry.
    pub async fn start(&mut self) {
        self.state = RunState::Configuring;

        if let Some(banner) = self.config.variant.banner() {
            self.sink.emit(banner);
        }

        if let Err(e) = self.sensor.init().await {
            error!("{}: startup configuration failed: {}", S::NAME, e);
        }

        self.state = RunState::Sampling;
    }

    /// Acquire one reading and emit exactly one line for it.
    ///
    /// A failed read is reported as a [`ReadFailure`] line so the console
    /// keeps its one-line-per-interval rhythm.
    pub async fn sample_once(&mut self, summary: &mut RunSummary) {
        let line = match self.sensor.read().await {
            Ok(reading) => {
                summary.reports += 1;
                format_line(&reading)
            }
            Err(e) => {
                error!("{}: read failed: {}", S::NAME, e);
                summary.failures += 1;
                format_line(&ReadFailure(e))
            }
        };

        self.sink.emit(line.as_str());
    }

    /// Run until `shutdown` is signaled.
    ///
    /// Each iteration reads, reports, then waits the configured interval.
    /// The wait is cut short when the signal fires.
    pub async fn run<M: RawMutex>(&mut self, shutdown: &Signal<M, ()>) -> RunSummary {
        let mut summary = RunSummary::default();
        let interval_ms = self.config.interval_ms();

        info!(
            "Sampler starting: {:?}, interval {} ms",
            self.config.variant, interval_ms
        );
        self.start().await;

        while !shutdown.signaled() {
            self.sample_once(&mut summary).await;

            if let Either::Second(()) =
                select(self.delay.delay_ms(interval_ms), shutdown.wait()).await
            {
                break;
            }
        }

        self.state = RunState::Stopped;
        info!(
            "Sampler stopped after {} reports, {} failed reads",
            summary.reports, summary.failures
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::{AdcSettings, SENSOR_BANNER};
    use crate::sensors::{AnalogInput, Mq7Sensor, PlaceholderSensor, SensorError};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::{Duration, Instant};
    use std::string::{String, ToString};
    use std::vec;
    use std::vec::Vec;

    type Shutdown = Signal<CriticalSectionRawMutex, ()>;

    struct ScriptedAdc {
        values: Vec<Result<u16, SensorError>>,
        next: usize,
    }

    impl ScriptedAdc {
        fn new(values: Vec<Result<u16, SensorError>>) -> Self {
            Self { values, next: 0 }
        }
    }

    impl AnalogInput for ScriptedAdc {
        fn configure(&mut self, _settings: &AdcSettings) -> Result<(), SensorError> {
            Ok(())
        }

        fn read_raw(&mut self) -> Result<u16, SensorError> {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }
    }

    #[derive(Default)]
    struct CollectSink {
        lines: Vec<String>,
    }

    impl ReportSink for CollectSink {
        fn emit(&mut self, line: &str) {
            self.lines.push(line.to_string());
        }
    }

    /// Returns immediately and raises shutdown after `stop_after` delays.
    struct FakeDelay<'a> {
        requested_ms: Vec<u32>,
        stop_after: usize,
        shutdown: &'a Shutdown,
    }

    impl<'a> FakeDelay<'a> {
        fn new(stop_after: usize, shutdown: &'a Shutdown) -> Self {
            Self {
                requested_ms: Vec::new(),
                stop_after,
                shutdown,
            }
        }
    }

    impl DelayNs for FakeDelay<'_> {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.requested_ms.push(ms);
            if self.requested_ms.len() >= self.stop_after {
                self.shutdown.signal(());
            }
        }
    }

    fn read_error() -> SensorError {
        SensorError::ReadFailed {
            sensor: "test",
            operation: "oneshot",
            details: "injected",
        }
    }

    #[test]
    fn test_sensor_variant_reports_each_iteration() {
        let shutdown = Shutdown::new();
        let adc = ScriptedAdc::new(vec![Ok(2048), Ok(0), Ok(4095)]);
        let mut sampler = Sampler::new(
            Mq7Sensor::new(adc, AdcSettings::default()),
            CollectSink::default(),
            FakeDelay::new(3, &shutdown),
            SamplerConfig::sensor(),
        );
        assert_eq!(sampler.state(), RunState::Idle);

        let summary = block_on(sampler.run(&shutdown));
        assert_eq!(sampler.state(), RunState::Stopped);
        assert_eq!(
            summary,
            RunSummary {
                reports: 3,
                failures: 0
            }
        );

        let (_, sink, delay) = sampler.into_parts();
        assert_eq!(
            sink.lines,
            vec![
                SENSOR_BANNER,
                "ADC-Rohwert: 2048, Spannung: 1.65 V",
                "ADC-Rohwert: 0, Spannung: 0.00 V",
                "ADC-Rohwert: 4095, Spannung: 3.30 V",
            ]
        );
        assert_eq!(delay.requested_ms, vec![1000, 1000, 1000]);
    }

    #[test]
    fn test_placeholder_variant() {
        let shutdown = Shutdown::new();
        let mut sampler = Sampler::new(
            PlaceholderSensor,
            CollectSink::default(),
            FakeDelay::new(2, &shutdown),
            SamplerConfig::placeholder(),
        );

        assert_eq!(sampler.config().interval_ms(), 2000);

        let summary = block_on(sampler.run(&shutdown));
        assert_eq!(summary.reports, 2);

        let (_, sink, delay) = sampler.into_parts();
        assert_eq!(sink.lines, vec!["Hello World", "Hello World"]);
        assert_eq!(delay.requested_ms, vec![2000, 2000]);
    }

    #[test]
    fn test_read_failure_still_reports_each_iteration() {
        let shutdown = Shutdown::new();
        let adc = ScriptedAdc::new(vec![Ok(0), Err(read_error()), Ok(5000), Ok(2048)]);
        let mut sampler = Sampler::new(
            Mq7Sensor::new(adc, AdcSettings::default()),
            CollectSink::default(),
            FakeDelay::new(4, &shutdown),
            SamplerConfig::sensor(),
        );

        let summary = block_on(sampler.run(&shutdown));
        assert_eq!(
            summary,
            RunSummary {
                reports: 2,
                failures: 2
            }
        );

        let (_, sink, delay) = sampler.into_parts();
        assert_eq!(
            sink.lines,
            vec![
                SENSOR_BANNER,
                "ADC-Rohwert: 0, Spannung: 0.00 V",
                "Lesefehler: test: oneshot failed (injected)",
                "Lesefehler: MQ-7: raw value 5000 exceeds maximum 4095",
                "ADC-Rohwert: 2048, Spannung: 1.65 V",
            ]
        );
        // Failed iterations still wait out the interval
        assert_eq!(delay.requested_ms, vec![1000, 1000, 1000, 1000]);
    }

    #[test]
    fn test_failing_input_emits_one_line_per_iteration() {
        let shutdown = Shutdown::new();
        let adc = ScriptedAdc::new(vec![Err(read_error())]);
        let mut sampler = Sampler::new(
            Mq7Sensor::new(adc, AdcSettings::default()),
            CollectSink::default(),
            FakeDelay::new(usize::MAX, &shutdown),
            SamplerConfig::sensor(),
        );
        let mut summary = RunSummary::default();

        block_on(sampler.start());
        for _ in 0..3 {
            block_on(sampler.sample_once(&mut summary));
        }

        assert_eq!(summary.failures, 3);
        let (_, sink, _) = sampler.into_parts();
        assert_eq!(sink.lines.len(), 4);
        assert_eq!(sink.lines[0], SENSOR_BANNER);
        assert!(sink.lines[1..].iter().all(|l| l.starts_with("Lesefehler: ")));
    }

    #[test]
    fn test_shutdown_before_run() {
        let shutdown = Shutdown::new();
        shutdown.signal(());

        let mut sampler = Sampler::new(
            PlaceholderSensor,
            CollectSink::default(),
            FakeDelay::new(usize::MAX, &shutdown),
            SamplerConfig::placeholder(),
        );

        assert_eq!(block_on(sampler.run(&shutdown)), RunSummary::default());
        let (_, sink, delay) = sampler.into_parts();
        assert!(sink.lines.is_empty());
        assert!(delay.requested_ms.is_empty());
    }

    /// Records when each line arrives and stops the run after `limit` lines.
    struct TimedSink<'a> {
        stamps: Vec<Instant>,
        limit: usize,
        shutdown: &'a Shutdown,
    }

    impl ReportSink for TimedSink<'_> {
        fn emit(&mut self, _line: &str) {
            self.stamps.push(Instant::now());
            if self.stamps.len() >= self.limit {
                self.shutdown.signal(());
            }
        }
    }

    #[test]
    fn test_lines_spaced_by_interval() {
        let interval = Duration::from_millis(30);
        let shutdown = Shutdown::new();
        let sink = TimedSink {
            stamps: Vec::new(),
            limit: 3,
            shutdown: &shutdown,
        };
        let mut sampler = Sampler::new(
            PlaceholderSensor,
            sink,
            embassy_time::Delay,
            SamplerConfig::placeholder().with_interval(interval),
        );

        let started = Instant::now();
        let summary = block_on(sampler.run(&shutdown));
        assert_eq!(summary.reports, 3);

        let (_, sink, _) = sampler.into_parts();
        for pair in sink.stamps.windows(2) {
            assert!(pair[1] - pair[0] >= interval);
        }
        // The final wait is cut short by the shutdown signal
        assert!(started.elapsed() < interval * 10);
    }
}
