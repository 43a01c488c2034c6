//! Touch sensor

use super::{SensorCore, SensorKind};
use crate::brick::Brick;
use crate::error::DeviceError;
use crate::ports::SensorPort;

/// The touch sensor (a momentary push button).
pub struct TouchSensor {
    core: SensorCore,
}

impl TouchSensor {
    /// Attach a touch sensor to a port.
    pub fn attach(brick: &Brick, port: SensorPort) -> Self {
        Self {
            core: SensorCore::attach(brick, port, SensorKind::Touch),
        }
    }

    /// The port this sensor is bound to.
    pub fn port(&self) -> SensorPort {
        self.core.port()
    }

    /// Whether the button is currently held down.
    pub fn is_pressed(&self) -> Result<bool, DeviceError> {
        Ok(self.core.read_si(0)? != 0.0)
    }

    /// How many presses the sensor has counted since it was plugged in.
    pub fn press_count(&self) -> Result<i32, DeviceError> {
        Ok(self.core.read_si(1)? as i32)
    }
}
