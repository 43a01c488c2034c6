//! Brick handle and peripheral-agnostic commands
//!
//! A [`Brick`] owns the transport and the device registry. Motors and
//! sensors hold shared handles to the same state, so everything stays on
//! one thread (the handles are deliberately not `Send`).

mod registry;

pub use registry::DeviceRegistry;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::motor::{self, MotorKind};
use crate::ports::{MotorPort, SensorPort};
use crate::protocol::opcodes::*;
use crate::protocol::{connect_tcp, open_serial, DirectCommand, ProtocolError, Reply, Transport};
use crate::sensor::SensorKind;

/// Status-light color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightColor {
    /// Lights off
    Off,
    /// Green
    Green,
    /// Red
    Red,
    /// Orange
    Orange,
}

/// Status-light effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightEffect {
    /// Steady light
    Solid,
    /// Flashing
    Flash,
    /// Slow pulse
    Pulse,
}

/// Compute the firmware LED pattern for a color/effect pair.
fn led_pattern(color: LightColor, effect: LightEffect) -> u8 {
    let base = match color {
        LightColor::Off => return 0,
        LightColor::Green => 1,
        LightColor::Red => 2,
        LightColor::Orange => 3,
    };
    match effect {
        LightEffect::Solid => base,
        LightEffect::Flash => base + 3,
        LightEffect::Pulse => base + 6,
    }
}

/// Display drawing color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayColor {
    /// Background color
    White,
    /// Foreground color
    Black,
}

impl DisplayColor {
    const fn code(self) -> i32 {
        match self {
            DisplayColor::White => 0,
            DisplayColor::Black => 1,
        }
    }
}

/// A physical button on the brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickButton {
    /// Up arrow
    Up,
    /// Center button
    Enter,
    /// Down arrow
    Down,
    /// Right arrow
    Right,
    /// Left arrow
    Left,
    /// Back button
    Back,
}

impl BrickButton {
    const fn code(self) -> i32 {
        match self {
            BrickButton::Up => 1,
            BrickButton::Enter => 2,
            BrickButton::Down => 3,
            BrickButton::Right => 4,
            BrickButton::Left => 5,
            BrickButton::Back => 6,
        }
    }
}

pub(crate) struct BrickInner {
    transport: Box<dyn Transport>,
    registry: DeviceRegistry,
    closed: bool,
}

impl BrickInner {
    /// Send a fire-and-forget command.
    pub(crate) fn send(&mut self, cmd: &DirectCommand) -> Result<(), ProtocolError> {
        self.transport.send_direct_command(cmd.ops(), 0)?;
        Ok(())
    }

    /// Send a command and collect its reply buffer.
    pub(crate) fn transceive(&mut self, cmd: &DirectCommand) -> Result<Reply, ProtocolError> {
        let data = self.transport.send_direct_command(cmd.ops(), cmd.reply_len())?;
        Ok(Reply::new(data))
    }

    pub(crate) fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    /// Stop every registered motor, best effort, exactly once.
    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let ports = self.registry.motor_ports();
        debug!(motors = ports.len(), "shutting down brick");
        for port in ports {
            let stop = motor::stop_command(port);
            if let Err(e) = self.send(&stop) {
                warn!(%port, error = %e, "failed to stop motor during shutdown");
            }
        }
    }
}

impl Drop for BrickInner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A connected EV3 programmable brick.
///
/// Created from an open transport; dropping the last handle (brick and all
/// peripherals) stops every registered motor and closes the connection.
pub struct Brick {
    inner: Rc<RefCell<BrickInner>>,
}

impl Brick {
    /// Connect over a Bluetooth RFCOMM device node (e.g. `/dev/rfcomm0`).
    pub fn bluetooth(device: &str) -> Result<Self, ProtocolError> {
        Ok(Self::with_transport(Box::new(open_serial(device, None)?)))
    }

    /// Connect over a wired USB serial device node.
    pub fn usb(device: &str) -> Result<Self, ProtocolError> {
        Ok(Self::with_transport(Box::new(open_serial(device, None)?)))
    }

    /// Connect to a brick on the network by host name or address.
    pub fn wifi(host: &str) -> Result<Self, ProtocolError> {
        Ok(Self::with_transport(Box::new(connect_tcp(host)?)))
    }

    /// Wrap an already-open transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BrickInner {
                transport,
                registry: DeviceRegistry::new(),
                closed: false,
            })),
        }
    }

    pub(crate) fn inner(&self) -> Rc<RefCell<BrickInner>> {
        Rc::clone(&self.inner)
    }

    /// The motor registered on a port, if any.
    pub fn motor(&self, port: MotorPort) -> Option<MotorKind> {
        self.inner.borrow().registry().motor(port)
    }

    /// The sensor registered on a port, if any.
    pub fn sensor(&self, port: SensorPort) -> Option<SensorKind> {
        self.inner.borrow().registry().sensor(port)
    }

    /// Stop all registered motors.
    ///
    /// Runs at most once; dropping the last handle does the same if this
    /// was never called. Individual stop failures are logged and skipped.
    /// The connection itself closes when the last handle is dropped.
    pub fn close(&self) {
        self.inner.borrow_mut().shutdown();
    }

    /// Set the status light (the light behind the brick buttons).
    pub fn set_status_light(
        &self,
        color: LightColor,
        effect: LightEffect,
    ) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new()
            .op(OP_UI_WRITE)
            .raw(UI_WRITE_LED)
            .constant(led_pattern(color, effect) as i32);
        self.inner.borrow_mut().send(&cmd)
    }

    /// Display a bitmap file from the brick's filesystem at a position.
    pub fn display_image(
        &self,
        path: &str,
        x: i32,
        y: i32,
        color: DisplayColor,
    ) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new()
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_TOPLINE)
            .constant(0) // hide the status line
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_BMPFILE)
            .constant(color.code())
            .constant(x)
            .constant(y)
            .string(path)
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_UPDATE);
        self.inner.borrow_mut().send(&cmd)
    }

    /// Clear the display by filling it with one color.
    pub fn clear_display(&self, color: DisplayColor) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new()
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_TOPLINE)
            .constant(1) // restore the status line
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_FILLWINDOW)
            .constant(color.code())
            .constant(0)
            .constant(0)
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_UPDATE);
        self.inner.borrow_mut().send(&cmd)
    }

    /// Draw a line between two points on the display.
    pub fn display_line(
        &self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: DisplayColor,
    ) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new()
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_LINE)
            .constant(color.code())
            .constant(x1)
            .constant(y1)
            .constant(x2)
            .constant(y2)
            .op(OP_UI_DRAW)
            .raw(UI_DRAW_UPDATE);
        self.inner.borrow_mut().send(&cmd)
    }

    /// Inject a button press as if pressed on the brick.
    ///
    /// With `wait` the command also blocks until the press is processed
    /// (a few milliseconds, and the safer default).
    pub fn simulate_button_press(
        &self,
        button: BrickButton,
        wait: bool,
    ) -> Result<(), ProtocolError> {
        let mut cmd = DirectCommand::new()
            .op(OP_UI_BUTTON)
            .raw(UI_BUTTON_PRESS)
            .constant(button.code());
        if wait {
            cmd = cmd.op(OP_UI_BUTTON).raw(UI_BUTTON_WAIT_FOR_PRESS);
        }
        self.inner.borrow_mut().send(&cmd)
    }

    /// Play a tone.
    ///
    /// `volume` is a percentage independent of the brick's volume setting,
    /// `frequency` is in Hz, `duration_ms` in milliseconds. Values are
    /// passed through unvalidated.
    pub fn play_tone(
        &self,
        volume: i32,
        frequency: i32,
        duration_ms: i32,
    ) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new()
            .op(OP_SOUND)
            .raw(SOUND_TONE)
            .constant(volume)
            .constant(frequency)
            .constant(duration_ms);
        self.inner.borrow_mut().send(&cmd)
    }

    /// Play a sound file from the brick's filesystem.
    ///
    /// With `repeat` the sound loops until [`stop_sound`](Self::stop_sound).
    pub fn play_sound(&self, path: &str, volume: i32, repeat: bool) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new()
            .op(OP_SOUND)
            .raw(if repeat { SOUND_REPEAT } else { SOUND_PLAY })
            .constant(volume)
            .string(path);
        self.inner.borrow_mut().send(&cmd)
    }

    /// Stop all sound playback.
    pub fn stop_sound(&self) -> Result<(), ProtocolError> {
        let cmd = DirectCommand::new().op(OP_SOUND).raw(SOUND_BREAK);
        self.inner.borrow_mut().send(&cmd)
    }

    /// The name assigned to the brick in its settings.
    pub fn brick_name(&self) -> Result<String, ProtocolError> {
        const NAME_LEN: usize = 16;
        let cmd = DirectCommand::new()
            .op(OP_COM_GET)
            .raw(COM_GET_BRICKNAME)
            .constant(NAME_LEN as i32)
            .global(0)
            .reserve_reply(NAME_LEN as u16);
        let reply = self.inner.borrow_mut().transceive(&cmd)?;
        reply.string_at(0, NAME_LEN)
    }
}
