//! Protocol errors

use thiserror::Error;

/// Errors that can occur during direct-command communication
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The serial port could not be opened or configured.
    #[error("Serial port error: {0}")]
    SerialError(String),

    /// The underlying stream failed mid round trip.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The reply frame is shorter than its header plus the requested
    /// global-memory allocation.
    #[error("Reply too short: expected {expected} bytes, got {actual}")]
    ReplyTooShort {
        /// Bytes the frame had to carry
        expected: usize,
        /// Bytes actually received
        actual: usize,
    },

    /// A positional read reaches past the end of the reply buffer.
    #[error("Decode past end of reply: offset {offset} in a {len}-byte buffer")]
    DecodeOutOfRange {
        /// First byte the read needed
        offset: usize,
        /// Length of the reply buffer
        len: usize,
    },

    /// The reply does not echo the request's message counter.
    #[error("Message counter mismatch: sent {sent:#06x}, reply carries {received:#06x}")]
    CounterMismatch {
        /// Counter carried by the request
        sent: u16,
        /// Counter carried by the reply
        received: u16,
    },

    /// The firmware returned an error status instead of executing the
    /// command.
    #[error("Brick rejected the direct command (reply status {status:#04x})")]
    CommandFailed {
        /// Status byte from the reply header
        status: u8,
    },

    /// The requested reply allocation does not fit the firmware's reply
    /// buffer.
    #[error("Reply allocation of {0} bytes exceeds the firmware limit")]
    ReplyAllocationTooLarge(u16),

    /// The encoded ops do not fit the frame's 16-bit length field.
    #[error("Command of {0} bytes exceeds the frame length limit")]
    CommandTooLarge(usize),

    /// A string read found bytes outside the ASCII range.
    #[error("Reply is not ASCII text")]
    NonAsciiReply,
}
