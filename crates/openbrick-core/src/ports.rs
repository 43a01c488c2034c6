//! Brick port addressing
//!
//! Motor ports are bit flags so a single output command can address several
//! motors at once; sensor ports are plain indices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An output (motor) port on the brick.
///
/// The values are bit flags: `All` addresses every motor in one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorPort {
    /// Port A
    A,
    /// Port B
    B,
    /// Port C
    C,
    /// Port D
    D,
    /// All four motor ports at once
    All,
}

impl MotorPort {
    /// Bit-flag value used in output commands.
    pub const fn mask(self) -> u8 {
        match self {
            MotorPort::A => 1,
            MotorPort::B => 2,
            MotorPort::C => 4,
            MotorPort::D => 8,
            MotorPort::All => 15,
        }
    }

    /// Index used when reading a motor back as an input device.
    ///
    /// Motor ports are addressed as inputs 16..=19. `All` spans several
    /// devices and cannot be read as one, so it has no input index.
    pub const fn input_index(self) -> Option<u8> {
        match self {
            MotorPort::A => Some(16),
            MotorPort::B => Some(17),
            MotorPort::C => Some(18),
            MotorPort::D => Some(19),
            MotorPort::All => None,
        }
    }
}

impl fmt::Display for MotorPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorPort::A => write!(f, "A"),
            MotorPort::B => write!(f, "B"),
            MotorPort::C => write!(f, "C"),
            MotorPort::D => write!(f, "D"),
            MotorPort::All => write!(f, "ALL"),
        }
    }
}

/// An input (sensor) port on the brick.
///
/// Ports are labelled 1-4 on the case; the firmware indexes them 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorPort {
    /// Port 1
    One,
    /// Port 2
    Two,
    /// Port 3
    Three,
    /// Port 4
    Four,
}

impl SensorPort {
    /// Zero-based index used in input commands.
    pub const fn index(self) -> u8 {
        match self {
            SensorPort::One => 0,
            SensorPort::Two => 1,
            SensorPort::Three => 2,
            SensorPort::Four => 3,
        }
    }
}

impl fmt::Display for SensorPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}
