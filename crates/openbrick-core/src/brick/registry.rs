//! Device registry
//!
//! Tracks which logical device occupies which physical port on one brick.
//! Double-registering a port is a soft conflict: a warning is logged and
//! the newer device wins. There is no unregistration; entries live as long
//! as the brick.

use std::collections::HashMap;

use tracing::warn;

use crate::motor::MotorKind;
use crate::ports::{MotorPort, SensorPort};
use crate::sensor::SensorKind;

/// Port-to-device mapping owned by a brick.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    motors: HashMap<MotorPort, MotorKind>,
    sensors: HashMap<SensorPort, SensorKind>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a motor on a port.
    ///
    /// Returns the displaced motor if the port was already occupied; the
    /// conflict is logged but not fatal.
    pub fn add_motor(&mut self, port: MotorPort, kind: MotorKind) -> Option<MotorKind> {
        let displaced = self.motors.insert(port, kind);
        if let Some(previous) = displaced {
            warn!(%port, ?previous, "motor port already has a motor assigned; replacing it");
        }
        displaced
    }

    /// Register a sensor on a port.
    ///
    /// Returns the displaced sensor if the port was already occupied; the
    /// conflict is logged but not fatal.
    pub fn add_sensor(&mut self, port: SensorPort, kind: SensorKind) -> Option<SensorKind> {
        let displaced = self.sensors.insert(port, kind);
        if let Some(previous) = displaced {
            warn!(%port, ?previous, "sensor port already has a sensor assigned; replacing it");
        }
        displaced
    }

    /// The motor registered on a port, if any.
    pub fn motor(&self, port: MotorPort) -> Option<MotorKind> {
        self.motors.get(&port).copied()
    }

    /// The sensor registered on a port, if any.
    pub fn sensor(&self, port: SensorPort) -> Option<SensorKind> {
        self.sensors.get(&port).copied()
    }

    /// Every port with a registered motor.
    pub fn motor_ports(&self) -> Vec<MotorPort> {
        self.motors.keys().copied().collect()
    }
}
