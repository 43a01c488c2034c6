//! # OpenBrick Core Library
//!
//! Host-side control of LEGO EV3 programmable bricks over the direct-command
//! protocol.

#![warn(missing_docs)]

//!
//! This library provides:
//! - Direct-command encoding (tagged constants, reply-slot references)
//! - Message framing and reply decoding for the EV3 wire format
//! - Blocking transports over serial device nodes and TCP
//! - Typed motor and sensor peripherals bound to brick ports
//! - Brick-level commands: status light, display, sound, buttons
//!
//! ## Example
//!
//! ```rust,ignore
//! use openbrick_core::{brick::Brick, motor::Motor, ports::MotorPort};
//!
//! // Connect over a Bluetooth RFCOMM device node
//! let brick = Brick::bluetooth("/dev/rfcomm0")?;
//! println!("connected to {}", brick.brick_name()?);
//!
//! let motor = Motor::large(&brick, MotorPort::C);
//! motor.rotate_degrees(50, 180.0)?;
//! ```

pub mod brick;
pub mod error;
pub mod motor;
pub mod ports;
pub mod protocol;
pub mod sensor;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::brick::{Brick, BrickButton, DisplayColor, LightColor, LightEffect};
    pub use crate::error::DeviceError;
    pub use crate::motor::{Motor, MotorKind};
    pub use crate::ports::{MotorPort, SensorPort};
    pub use crate::protocol::{DirectCommand, ProtocolError, Reply, Transport};
    pub use crate::sensor::{
        BeaconButton, BeaconButtonState, BeaconChannel, Color, ColorSensor, InfraredSensor,
        SensorKind, TouchSensor,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
