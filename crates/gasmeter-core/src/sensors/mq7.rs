use crate::config::{ADC_MAX_RAW, AdcSettings};
use crate::sample::Sample;
use crate::sensors::{AnalogInput, SensorError};

use super::Sensor;
use log::{debug, error, info};

/// MQ-7 carbon monoxide sensor on a single ADC channel.
///
/// The sensor's analog output is read as raw counts and converted to volts.
/// No calibration curve is applied.
pub struct Mq7Sensor<A> {
    input: A,
    settings: AdcSettings,
    configured: bool,
}

impl<A: AnalogInput> Mq7Sensor<A> {
    pub fn new(input: A, settings: AdcSettings) -> Self {
        Self {
            input,
            settings,
            configured: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Release the underlying input.
    pub fn into_inner(self) -> A {
        self.input
    }
}

impl<A: AnalogInput> Sensor for Mq7Sensor<A> {
    const NAME: &'static str = "MQ-7";

    type Reading = Sample;

    async fn init(&mut self) -> Result<(), SensorError> {
        self.input.configure(&self.settings).map_err(|e| {
            error!("MQ-7 ADC configuration failed: {}", e);
            e
        })?;

        if !self.configured {
            info!(
                "MQ-7: ADC configured ({} bit, {})",
                AdcSettings::RESOLUTION_BITS,
                self.settings.attenuation.label()
            );
        }
        self.configured = true;

        Ok(())
    }

    async fn read(&mut self) -> Result<Sample, SensorError> {
        // Configure on first read if startup configuration did not succeed
        if !self.configured {
            self.init().await?;
        }

        let raw = self.input.read_raw()?;
        debug!("MQ-7: raw = {}", raw);

        Sample::from_raw(raw).ok_or(SensorError::OutOfRange {
            sensor: Self::NAME,
            raw,
            max: ADC_MAX_RAW,
        })
    }
}
