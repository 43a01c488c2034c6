//! Infrared sensor
//!
//! Covers the proximity mode, the beacon seeker mode, and the beacon
//! remote-button mode. The remote reports button chords as a single code;
//! [`BeaconButtonState::buttons`] explodes a chord into its atomic buttons.

use serde::{Deserialize, Serialize};

use super::{SensorCore, SensorKind};
use crate::brick::Brick;
use crate::error::DeviceError;
use crate::ports::SensorPort;
use crate::protocol::opcodes::{INPUT_READY_RAW, INPUT_READY_SI};

/// A beacon transmit channel (the red selector switch on the remote).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeaconChannel {
    /// Channel 1
    One,
    /// Channel 2
    Two,
    /// Channel 3
    Three,
    /// Channel 4
    Four,
}

impl BeaconChannel {
    /// Zero-based channel index.
    pub const fn index(self) -> usize {
        match self {
            BeaconChannel::One => 0,
            BeaconChannel::Two => 1,
            BeaconChannel::Three => 2,
            BeaconChannel::Four => 3,
        }
    }
}

/// A single physical button on the beacon remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeaconButton {
    /// Upper red button
    RedUpper,
    /// Lower red button
    RedLower,
    /// Upper blue button
    BlueUpper,
    /// Lower blue button
    BlueLower,
    /// The wide beacon-mode button on top
    Beacon,
}

/// The button chord the remote reports, as one of twelve states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeaconButtonState {
    /// Nothing pressed
    NoButton,
    /// Upper red only
    RedUpper,
    /// Lower red only
    RedLower,
    /// Upper blue only
    BlueUpper,
    /// Lower blue only
    BlueLower,
    /// Upper red and upper blue
    RedUpperAndBlueUpper,
    /// Upper red and lower blue
    RedUpperAndBlueLower,
    /// Lower red and upper blue
    RedLowerAndBlueUpper,
    /// Lower red and lower blue
    RedLowerAndBlueLower,
    /// Beacon mode on
    Beacon,
    /// Both red buttons
    RedUpperAndRedLower,
    /// Both blue buttons
    BlueUpperAndBlueLower,
}

impl BeaconButtonState {
    /// Map a firmware chord code (0-11) to a state.
    pub fn from_code(code: i32) -> Result<Self, DeviceError> {
        match code {
            0 => Ok(BeaconButtonState::NoButton),
            1 => Ok(BeaconButtonState::RedUpper),
            2 => Ok(BeaconButtonState::RedLower),
            3 => Ok(BeaconButtonState::BlueUpper),
            4 => Ok(BeaconButtonState::BlueLower),
            5 => Ok(BeaconButtonState::RedUpperAndBlueUpper),
            6 => Ok(BeaconButtonState::RedUpperAndBlueLower),
            7 => Ok(BeaconButtonState::RedLowerAndBlueUpper),
            8 => Ok(BeaconButtonState::RedLowerAndBlueLower),
            9 => Ok(BeaconButtonState::Beacon),
            10 => Ok(BeaconButtonState::RedUpperAndRedLower),
            11 => Ok(BeaconButtonState::BlueUpperAndBlueLower),
            other => Err(DeviceError::UnknownBeaconState(other)),
        }
    }

    /// The atomic buttons composing this chord (zero, one, or two).
    pub fn buttons(self) -> Vec<BeaconButton> {
        use BeaconButton::*;
        match self {
            BeaconButtonState::NoButton => vec![],
            BeaconButtonState::RedUpper => vec![RedUpper],
            BeaconButtonState::RedLower => vec![RedLower],
            BeaconButtonState::BlueUpper => vec![BlueUpper],
            BeaconButtonState::BlueLower => vec![BlueLower],
            BeaconButtonState::RedUpperAndBlueUpper => vec![RedUpper, BlueUpper],
            BeaconButtonState::RedUpperAndBlueLower => vec![RedUpper, BlueLower],
            BeaconButtonState::RedLowerAndBlueUpper => vec![RedLower, BlueUpper],
            BeaconButtonState::RedLowerAndBlueLower => vec![RedLower, BlueLower],
            BeaconButtonState::Beacon => vec![Beacon],
            BeaconButtonState::RedUpperAndRedLower => vec![RedUpper, RedLower],
            BeaconButtonState::BlueUpperAndBlueLower => vec![BlueUpper, BlueLower],
        }
    }
}

/// The infrared sensor.
pub struct InfraredSensor {
    core: SensorCore,
}

impl InfraredSensor {
    /// Attach an infrared sensor to a port.
    pub fn attach(brick: &Brick, port: SensorPort) -> Self {
        Self {
            core: SensorCore::attach(brick, port, SensorKind::Infrared),
        }
    }

    /// The port this sensor is bound to.
    pub fn port(&self) -> SensorPort {
        self.core.port()
    }

    /// Approximate distance to an object in front of the sensor.
    pub fn distance(&self) -> Result<f32, DeviceError> {
        Ok(self.core.read_si(0)?)
    }

    /// Heading and proximity of the beacon on a channel.
    ///
    /// The beacon must be in beacon mode (green light on). Heading is
    /// negative to the left, positive to the right; proximity grows with
    /// distance. The seeker mode reports all four channels in one read;
    /// the requested channel's pair is returned.
    pub fn beacon_proximity(&self, channel: BeaconChannel) -> Result<(i32, i32), DeviceError> {
        // eight raw values: heading then proximity per channel
        let mut cmd = self.core.read_command(INPUT_READY_RAW, 1, 8);
        for slot in 0..8u32 {
            cmd = cmd.global(slot * 4);
        }
        let reply = self.core.transceive(&cmd)?;
        let base = channel.index() * 8;
        Ok((reply.int_at(base)?, reply.int_at(base + 4)?))
    }

    /// The button chord currently pressed on the beacon remote for a
    /// channel.
    ///
    /// The remote mode reports all four channels in one read; the
    /// requested channel's float code is truncated and mapped to a
    /// [`BeaconButtonState`].
    pub fn beacon_buttons_raw(
        &self,
        channel: BeaconChannel,
    ) -> Result<BeaconButtonState, DeviceError> {
        let mut cmd = self.core.read_command(INPUT_READY_SI, 2, 4);
        for slot in 0..4u32 {
            cmd = cmd.global(slot * 4);
        }
        let reply = self.core.transceive(&cmd)?;
        let raw = reply.float_at(channel.index() * 4)?;
        BeaconButtonState::from_code(raw as i32)
    }

    /// The atomic buttons currently pressed on the beacon remote for a
    /// channel, empty if none.
    pub fn beacon_buttons(&self, channel: BeaconChannel) -> Result<Vec<BeaconButton>, DeviceError> {
        Ok(self.beacon_buttons_raw(channel)?.buttons())
    }
}
