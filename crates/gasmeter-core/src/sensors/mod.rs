mod mq7;
mod placeholder;

use crate::config::AdcSettings;
use thiserror_no_std::Error;

pub use mq7::Mq7Sensor;
pub use placeholder::{Greeting, PlaceholderSensor};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor}: {operation} failed ({details})")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
        details: &'static str,
    },
    #[error("{sensor}: raw value {raw} exceeds maximum {max}")]
    OutOfRange {
        sensor: &'static str,
        raw: u16,
        max: u16,
    },
    #[error("{sensor}: initialization failed ({details})")]
    InitializationFailed {
        sensor: &'static str,
        details: &'static str,
    },
    #[error("{sensor}: read before the input was configured")]
    NotConfigured { sensor: &'static str },
}

/// One analog-to-digital input channel.
///
/// Implemented by the platform ADC driver on hardware and by fakes in tests
/// and the simulator.
pub trait AnalogInput {
    /// Apply resolution and attenuation settings.
    ///
    /// Calling this again with the same settings must leave read behavior unchanged.
    fn configure(&mut self, settings: &AdcSettings) -> Result<(), SensorError>;

    /// Blocking read of the current raw value.
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

/// Trait for sensors that produce typed readings.
pub trait Sensor {
    /// Name used in log output
    const NAME: &'static str;

    /// The type of readings this sensor produces.
    type Reading;

    /// One-time setup before the first read.
    fn init(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Read the sensor and return a typed reading.
    fn read(&mut self) -> impl Future<Output = Result<Self::Reading, SensorError>>;
}
