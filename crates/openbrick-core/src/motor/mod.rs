//! Motors
//!
//! A [`Motor`] is a handle bound to a brick and an output port. The motor
//! model is carried as an explicit [`MotorKind`] plus a max-RPM field;
//! angle-based rotation is an open-loop time approximation and drifts
//! under load.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::brick::{Brick, BrickInner};
use crate::error::DeviceError;
use crate::ports::MotorPort;
use crate::protocol::opcodes::{
    INPUT_READY_SI, OP_INPUT_DEVICE, OP_OUTPUT_SPEED, OP_OUTPUT_START, OP_OUTPUT_STOP,
    TYPE_LARGE_MOTOR,
};
use crate::protocol::DirectCommand;

/// Max RPM of the large motor
const LARGE_MOTOR_MAX_RPM: f32 = 170.0;
/// Max RPM of the medium motor
const MEDIUM_MOTOR_MAX_RPM: f32 = 250.0;

/// Motor model registered on a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorKind {
    /// The large motor (type number 7)
    Large,
    /// The medium motor (type number 8)
    Medium,
    /// An unidentified motor; angle-based rotation is unavailable
    Generic,
}

/// Build the speed+start bundle for one or more motors.
///
/// Both sub-operations travel in one message and run back to back in the
/// firmware.
pub(crate) fn rotate_command(port: MotorPort, speed: i32) -> DirectCommand {
    DirectCommand::new()
        .op(OP_OUTPUT_SPEED)
        .constant(0) // layer
        .constant(port.mask() as i32)
        .constant(speed)
        .op(OP_OUTPUT_START)
        .constant(0) // layer
        .constant(port.mask() as i32)
}

/// Build the stop command (coast, no brake).
pub(crate) fn stop_command(port: MotorPort) -> DirectCommand {
    DirectCommand::new()
        .op(OP_OUTPUT_STOP)
        .constant(0) // layer
        .constant(port.mask() as i32)
        .constant(0) // brake off
}

/// A motor bound to a brick port.
///
/// Constructing a motor registers it with the brick; a port can only be
/// re-registered with a warning (last write wins).
pub struct Motor {
    brick: Rc<RefCell<BrickInner>>,
    port: MotorPort,
    kind: MotorKind,
    max_rpm: Option<f32>,
}

impl Motor {
    /// Attach a large motor (max RPM 170).
    pub fn large(brick: &Brick, port: MotorPort) -> Self {
        Self::attach(brick, port, MotorKind::Large, Some(LARGE_MOTOR_MAX_RPM))
    }

    /// Attach a medium motor (max RPM 250).
    pub fn medium(brick: &Brick, port: MotorPort) -> Self {
        Self::attach(brick, port, MotorKind::Medium, Some(MEDIUM_MOTOR_MAX_RPM))
    }

    /// Attach a motor of unknown model. Speed and time based rotation work;
    /// angle-based rotation needs a known max RPM and fails with
    /// [`DeviceError::MaxRpmNotSet`].
    pub fn generic(brick: &Brick, port: MotorPort) -> Self {
        Self::attach(brick, port, MotorKind::Generic, None)
    }

    fn attach(brick: &Brick, port: MotorPort, kind: MotorKind, max_rpm: Option<f32>) -> Self {
        let inner = brick.inner();
        inner.borrow_mut().registry_mut().add_motor(port, kind);
        Self {
            brick: inner,
            port,
            kind,
            max_rpm,
        }
    }

    /// The port this motor is bound to.
    pub fn port(&self) -> MotorPort {
        self.port
    }

    /// The registered motor model.
    pub fn kind(&self) -> MotorKind {
        self.kind
    }

    /// The motor's max RPM, if known.
    pub fn max_rpm(&self) -> Option<f32> {
        self.max_rpm
    }

    /// Start rotating at a speed percentage. Fire and forget: the motor
    /// spins until stopped or the brick shuts down.
    pub fn rotate(&self, speed: i32) -> Result<(), DeviceError> {
        let cmd = rotate_command(self.port, speed);
        self.brick.borrow_mut().send(&cmd)?;
        Ok(())
    }

    /// Stop the motor (coasting, no brake).
    pub fn stop(&self) -> Result<(), DeviceError> {
        let cmd = stop_command(self.port);
        self.brick.borrow_mut().send(&cmd)?;
        Ok(())
    }

    /// Rotate at a speed percentage for a duration, then stop.
    ///
    /// Blocks the calling thread for the whole duration. A caller that
    /// needs cancellation can instead compose [`rotate`](Self::rotate) and
    /// [`stop`](Self::stop) with its own timer; `stop` is a small
    /// independent command and safe to issue from elsewhere.
    pub fn rotate_for_time(&self, speed: i32, duration: Duration) -> Result<(), DeviceError> {
        self.rotate(speed)?;
        thread::sleep(duration);
        self.stop()
    }

    /// Rotate through an angle in degrees at a speed percentage.
    ///
    /// Open-loop: the angle is converted to a run time from the motor's
    /// max RPM, so the result drifts under load. Requires a known max RPM.
    pub fn rotate_degrees(&self, speed: i32, angle: f32) -> Result<(), DeviceError> {
        let duration = self.rotation_duration(speed, angle)?;
        self.rotate_for_time(speed, duration)
    }

    /// The run time [`rotate_degrees`](Self::rotate_degrees) would use for
    /// a speed/angle pair: `angle / ((speed/100 · max_rpm) · 6)` seconds.
    pub fn rotation_duration(&self, speed: i32, angle: f32) -> Result<Duration, DeviceError> {
        let max_rpm = self.max_rpm.ok_or(DeviceError::MaxRpmNotSet)?;
        let rpm = (speed as f32 / 100.0) * max_rpm;
        let degrees_per_second = rpm * 6.0;
        let seconds = angle / degrees_per_second;
        // zero speed divides to infinity, opposite-sign pairs to a negative
        // run time; neither is a representable Duration
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DeviceError::InvalidRotationTime { speed, angle });
        }
        Ok(Duration::from_secs_f32(seconds))
    }

    /// The current motor position in degrees.
    ///
    /// The read command goes out twice: once fire-and-forget to prime the
    /// device, then again for the replied value. Dropping the priming send
    /// changes the observed behavior on hardware.
    pub fn rotation(&self) -> Result<f32, DeviceError> {
        let input = self
            .port
            .input_index()
            .ok_or(DeviceError::UnreadablePort(self.port))?;
        // the tacho readout goes through the large-motor type table
        let cmd = DirectCommand::new()
            .op(OP_INPUT_DEVICE)
            .raw(INPUT_READY_SI)
            .constant(0) // layer
            .constant(input as i32)
            .constant(TYPE_LARGE_MOTOR as i32)
            .constant(0) // mode: degrees
            .constant(1) // one value
            .global(0);

        let mut brick = self.brick.borrow_mut();
        brick.send(&cmd)?;
        let reply = brick.transceive(&cmd)?;
        Ok(reply.float_at(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rotate_command_bundles_speed_and_start() {
        let cmd = rotate_command(MotorPort::C, 50);
        assert_eq!(
            cmd.ops(),
            &[
                OP_OUTPUT_SPEED,
                0x00, // layer
                0x04, // port C mask
                0x81,
                50, // speed, one-byte tagged
                OP_OUTPUT_START,
                0x00, // layer
                0x04, // port C mask
            ]
        );
        assert_eq!(cmd.reply_len(), 0);
    }

    #[test]
    fn rotate_command_preserves_multi_motor_masks() {
        let cmd = rotate_command(MotorPort::All, 10);
        assert_eq!(cmd.ops()[2], 0x0F);
    }

    #[test]
    fn stop_command_coasts() {
        let cmd = stop_command(MotorPort::B);
        assert_eq!(cmd.ops(), &[OP_OUTPUT_STOP, 0x00, 0x02, 0x00]);
    }
}
