//! Color sensor

use serde::{Deserialize, Serialize};

use super::{SensorCore, SensorKind};
use crate::brick::Brick;
use crate::error::DeviceError;
use crate::ports::SensorPort;

/// A color the sensor can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// No resolvable color
    NoColor,
    /// Black
    Black,
    /// Blue
    Blue,
    /// Green
    Green,
    /// Yellow
    Yellow,
    /// Red
    Red,
    /// White
    White,
    /// Brown
    Brown,
}

impl Color {
    /// Map a firmware color code (0-7) to a color.
    pub fn from_code(code: i32) -> Result<Self, DeviceError> {
        match code {
            0 => Ok(Color::NoColor),
            1 => Ok(Color::Black),
            2 => Ok(Color::Blue),
            3 => Ok(Color::Green),
            4 => Ok(Color::Yellow),
            5 => Ok(Color::Red),
            6 => Ok(Color::White),
            7 => Ok(Color::Brown),
            other => Err(DeviceError::UnknownColor(other)),
        }
    }
}

/// The color sensor.
pub struct ColorSensor {
    core: SensorCore,
}

impl ColorSensor {
    /// Attach a color sensor to a port.
    pub fn attach(brick: &Brick, port: SensorPort) -> Self {
        Self {
            core: SensorCore::attach(brick, port, SensorKind::Color),
        }
    }

    /// The port this sensor is bound to.
    pub fn port(&self) -> SensorPort {
        self.core.port()
    }

    /// Reflected light intensity, 0 (no light) to 100 (full light).
    pub fn reflected_light(&self) -> Result<f32, DeviceError> {
        Ok(self.core.read_si(0)?)
    }

    /// Ambient light intensity, 0 (darkness) to 100 (direct sunlight).
    pub fn ambient_light(&self) -> Result<f32, DeviceError> {
        Ok(self.core.read_si(1)?)
    }

    /// The color in front of the sensor, or [`Color::NoColor`] if it
    /// cannot be resolved. An out-of-range code is a hard decode error.
    pub fn color(&self) -> Result<Color, DeviceError> {
        let raw = self.core.read_si(2)?;
        Color::from_code(raw as i32)
    }
}
