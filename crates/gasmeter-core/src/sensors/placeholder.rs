use core::fmt;

use crate::sensors::SensorError;

use super::Sensor;

/// Reading produced by [`PlaceholderSensor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Greeting;

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hello World")
    }
}

/// Stand-in for boards without the gas sensor fitted; never touches the ADC.
#[derive(Debug, Default)]
pub struct PlaceholderSensor;

impl Sensor for PlaceholderSensor {
    const NAME: &'static str = "placeholder";

    type Reading = Greeting;

    async fn init(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    async fn read(&mut self) -> Result<Greeting, SensorError> {
        Ok(Greeting)
    }
}
