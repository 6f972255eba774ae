//! Compile-time configuration for the sampler

use embassy_time::Duration;

/// Highest raw value at 12-bit resolution.
pub const ADC_MAX_RAW: u16 = 4095;

/// Reference voltage of the input range at 11 dB attenuation (ESP32 runs at 3.3 V).
pub const REFERENCE_VOLTS: f64 = 3.3;

/// Delay between reports in the sensor variant.
pub const SENSOR_INTERVAL: Duration = Duration::from_millis(1000);

/// Delay between reports in the placeholder variant.
pub const PLACEHOLDER_INTERVAL: Duration = Duration::from_millis(2000);

/// Printed once before the sensor variant starts sampling.
pub const SENSOR_BANNER: &str = "MQ-7 Gassensor-Test startet...";

/// Input attenuation of the ADC channel
///
/// Controls the maximum input voltage mapped onto the full raw range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attenuation {
    /// No attenuation
    Db0,
    /// 2.5 dB
    Db2_5,
    /// 6 dB
    Db6,
    /// 11 dB, maximum voltage range
    #[default]
    Db11,
}

impl Attenuation {
    /// Short label for logging
    pub const fn label(self) -> &'static str {
        match self {
            Self::Db0 => "0dB",
            Self::Db2_5 => "2.5dB",
            Self::Db6 => "6dB",
            Self::Db11 => "11dB",
        }
    }
}

/// ADC channel settings applied once at startup.
///
/// Resolution is always 12 bits, see [`ADC_MAX_RAW`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdcSettings {
    pub attenuation: Attenuation,
}

impl AdcSettings {
    pub const RESOLUTION_BITS: u8 = 12;

    pub const fn new(attenuation: Attenuation) -> Self {
        Self { attenuation }
    }
}

/// Which firmware build is running.
///
/// Only one variant can run on a device at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Reads the MQ-7 gas sensor and reports raw value and voltage
    Sensor,
    /// Prints "Hello World" without touching the ADC
    Placeholder,
}

impl Variant {
    /// Default delay between two reports
    pub const fn interval(self) -> Duration {
        match self {
            Self::Sensor => SENSOR_INTERVAL,
            Self::Placeholder => PLACEHOLDER_INTERVAL,
        }
    }

    /// Line emitted once before the loop starts, if any
    pub const fn banner(self) -> Option<&'static str> {
        match self {
            Self::Sensor => Some(SENSOR_BANNER),
            Self::Placeholder => None,
        }
    }
}

/// Sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    pub variant: Variant,
    pub interval: Duration,
    pub adc: AdcSettings,
}

impl SamplerConfig {
    /// Configuration with the variant's default interval and full-range ADC settings
    pub const fn new(variant: Variant) -> Self {
        Self {
            variant,
            interval: variant.interval(),
            adc: AdcSettings::new(Attenuation::Db11),
        }
    }

    pub const fn sensor() -> Self {
        Self::new(Variant::Sensor)
    }

    pub const fn placeholder() -> Self {
        Self::new(Variant::Placeholder)
    }

    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Apply an interval override given in milliseconds as text.
    ///
    /// Used for the build-time `.env` override. Returns `None` when the value
    /// is not a positive integer, leaving the caller to keep the default.
    pub fn with_interval_override(self, millis: &str) -> Option<Self> {
        match millis.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Some(self.with_interval(Duration::from_millis(ms))),
            _ => None,
        }
    }

    /// Interval as whole milliseconds, saturated to what a delay call accepts
    pub fn interval_ms(&self) -> u32 {
        u32::try_from(self.interval.as_millis()).unwrap_or(u32::MAX)
    }
}
