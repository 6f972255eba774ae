//! Raw ADC samples and their conversion to volts

use core::fmt;

use crate::config::{ADC_MAX_RAW, REFERENCE_VOLTS};

/// One reading of the gas sensor input.
///
/// Created once per loop iteration and consumed by the report step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Unconverted ADC counts, `0..=4095`
    pub raw: u16,
    /// Input voltage in volts, `0.0..=3.3`
    pub voltage: f32,
}

impl Sample {
    /// Build a sample from raw counts, or `None` above 12-bit range.
    pub fn from_raw(raw: u16) -> Option<Self> {
        if raw > ADC_MAX_RAW {
            return None;
        }

        Some(Self {
            raw,
            voltage: raw_to_volts(raw),
        })
    }
}

/// Linear scale from ADC counts to volts: `(raw / 4095) * 3.3`
pub fn raw_to_volts(raw: u16) -> f32 {
    ((raw as f64 / ADC_MAX_RAW as f64) * REFERENCE_VOLTS) as f32
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ADC-Rohwert: {}, Spannung: {:.2} V", self.raw, self.voltage)
    }
}
