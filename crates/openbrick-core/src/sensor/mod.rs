//! Sensors
//!
//! Every typed sensor reading funnels through one primitive: a device read
//! at a given mode index that decodes a single float. The sensor's device
//! type number selects the firmware's mode table, so sensors are only
//! constructed as concrete types.

mod color;
mod infrared;
mod touch;

pub use color::{Color, ColorSensor};
pub use infrared::{BeaconButton, BeaconButtonState, BeaconChannel, InfraredSensor};
pub use touch::TouchSensor;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::brick::{Brick, BrickInner};
use crate::ports::SensorPort;
use crate::protocol::opcodes::{
    INPUT_READY_SI, OP_INPUT_DEVICE, TYPE_COLOR_SENSOR, TYPE_INFRARED_SENSOR, TYPE_TOUCH_SENSOR,
};
use crate::protocol::{DirectCommand, ProtocolError, Reply};

/// Sensor model registered on a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    /// Touch sensor (type number 16)
    Touch,
    /// Color sensor (type number 29)
    Color,
    /// Infrared sensor (type number 33)
    Infrared,
}

impl SensorKind {
    /// Firmware device type number; selects the mode table for reads.
    pub const fn type_number(self) -> u8 {
        match self {
            SensorKind::Touch => TYPE_TOUCH_SENSOR,
            SensorKind::Color => TYPE_COLOR_SENSOR,
            SensorKind::Infrared => TYPE_INFRARED_SENSOR,
        }
    }
}

/// Shared plumbing of a sensor bound to a brick port.
pub(crate) struct SensorCore {
    brick: Rc<RefCell<BrickInner>>,
    port: SensorPort,
    type_number: u8,
}

impl SensorCore {
    /// Bind to a port and register with the brick.
    pub(crate) fn attach(brick: &Brick, port: SensorPort, kind: SensorKind) -> Self {
        let inner = brick.inner();
        inner.borrow_mut().registry_mut().add_sensor(port, kind);
        Self {
            brick: inner,
            port,
            type_number: kind.type_number(),
        }
    }

    pub(crate) fn port(&self) -> SensorPort {
        self.port
    }

    /// Read one SI-unit float at a mode index.
    pub(crate) fn read_si(&self, mode: i32) -> Result<f32, ProtocolError> {
        let cmd = self
            .read_command(INPUT_READY_SI, mode, 1)
            .global(0);
        let reply = self.brick.borrow_mut().transceive(&cmd)?;
        reply.float_at(0)
    }

    /// Start a device-read command; the caller appends its reply slots.
    pub(crate) fn read_command(&self, subcode: u8, mode: i32, values: i32) -> DirectCommand {
        DirectCommand::new()
            .op(OP_INPUT_DEVICE)
            .raw(subcode)
            .constant(0) // layer
            .constant(self.port.index() as i32)
            .constant(self.type_number as i32)
            .constant(mode)
            .constant(values)
    }

    pub(crate) fn transceive(&self, cmd: &DirectCommand) -> Result<Reply, ProtocolError> {
        self.brick.borrow_mut().transceive(cmd)
    }
}
