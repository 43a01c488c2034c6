//! Device-level errors

use crate::ports::MotorPort;
use crate::protocol::ProtocolError;
use thiserror::Error;

/// Errors raised by motor and sensor operations.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The underlying protocol round trip failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Angle-based rotation needs a known max RPM. Construct the motor with
    /// [`Motor::large`](crate::motor::Motor::large) or
    /// [`Motor::medium`](crate::motor::Motor::medium) to set it.
    #[error("max RPM is not set for this motor; use a large or medium motor for angle-based rotation")]
    MaxRpmNotSet,

    /// The speed/angle pair does not convert to a finite, non-negative run
    /// time (zero speed, or an angle opposing the direction of rotation).
    #[error("angle {angle} at speed {speed} does not give a usable run time")]
    InvalidRotationTime {
        /// Requested speed percentage
        speed: i32,
        /// Requested angle in degrees
        angle: f32,
    },

    /// The port addresses several motors and cannot be read as one device.
    #[error("motor port {0} cannot be read as a single input device")]
    UnreadablePort(MotorPort),

    /// The color sensor reported a code outside the enumerated range 0-7.
    #[error("color sensor returned out-of-range color code {0}")]
    UnknownColor(i32),

    /// The infrared sensor reported a beacon button code outside 0-11.
    #[error("infrared sensor returned unknown beacon button code {0}")]
    UnknownBeaconState(i32),
}
