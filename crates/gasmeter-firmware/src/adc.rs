//! MQ-7 analog input on the ESP32's ADC1
//!
//! The sensor's analog output is wired to GPIO34 (ADC1 channel 6). The esp-hal
//! driver consumes the raw peripherals when it is built, so configuration
//! happens exactly once; repeating it with the same settings is a no-op.

use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation as EspAttenuation};
use esp_hal::peripherals::{ADC1, GPIO34};
use gasmeter_core::config::{AdcSettings, Attenuation};
use gasmeter_core::sensors::{AnalogInput, SensorError};
use log::{error, info};

const SENSOR: &str = "MQ-7";

fn esp_attenuation(attenuation: Attenuation) -> EspAttenuation {
    match attenuation {
        Attenuation::Db0 => EspAttenuation::_0dB,
        Attenuation::Db2_5 => EspAttenuation::_2p5dB,
        Attenuation::Db6 => EspAttenuation::_6dB,
        Attenuation::Db11 => EspAttenuation::_11dB,
    }
}

enum Channel<'d> {
    Unconfigured {
        adc: ADC1<'d>,
        pin: GPIO34<'d>,
    },
    Configured {
        adc: Adc<'d, ADC1<'d>, Blocking>,
        pin: AdcPin<GPIO34<'d>, ADC1<'d>>,
        settings: AdcSettings,
    },
    // Held only while `configure` swaps the channel state
    Detached,
}

/// ADC1 channel 6 wrapped as an [`AnalogInput`].
pub struct Mq7AdcInput<'d> {
    channel: Channel<'d>,
}

impl<'d> Mq7AdcInput<'d> {
    pub fn new(adc: ADC1<'d>, pin: GPIO34<'d>) -> Self {
        Self {
            channel: Channel::Unconfigured { adc, pin },
        }
    }
}

impl AnalogInput for Mq7AdcInput<'_> {
    fn configure(&mut self, settings: &AdcSettings) -> Result<(), SensorError> {
        match core::mem::replace(&mut self.channel, Channel::Detached) {
            Channel::Unconfigured { adc, pin } => {
                // AdcConfig defaults to 12-bit resolution
                let mut config = AdcConfig::new();
                let pin = config.enable_pin(pin, esp_attenuation(settings.attenuation));
                let adc = Adc::new(adc, config);

                info!(
                    "ADC1 channel 6 enabled with {} attenuation",
                    settings.attenuation.label()
                );
                self.channel = Channel::Configured {
                    adc,
                    pin,
                    settings: *settings,
                };
                Ok(())
            }
            Channel::Configured {
                adc,
                pin,
                settings: current,
            } => {
                self.channel = Channel::Configured {
                    adc,
                    pin,
                    settings: current,
                };

                if current == *settings {
                    Ok(())
                } else {
                    error!(
                        "ADC1 already configured with {}, cannot switch to {}",
                        current.attenuation.label(),
                        settings.attenuation.label()
                    );
                    Err(SensorError::InitializationFailed {
                        sensor: SENSOR,
                        details: "ADC already configured with different settings",
                    })
                }
            }
            Channel::Detached => Err(SensorError::InitializationFailed {
                sensor: SENSOR,
                details: "ADC peripherals unavailable",
            }),
        }
    }

    fn read_raw(&mut self) -> Result<u16, SensorError> {
        match &mut self.channel {
            Channel::Configured { adc, pin, .. } => {
                nb::block!(adc.read_oneshot(pin)).map_err(|_| SensorError::ReadFailed {
                    sensor: SENSOR,
                    operation: "oneshot conversion",
                    details: "ADC1 rejected the conversion request",
                })
            }
            _ => Err(SensorError::NotConfigured { sensor: SENSOR }),
        }
    }
}
