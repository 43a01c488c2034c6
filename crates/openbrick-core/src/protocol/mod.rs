//! Direct-command protocol
//!
//! Implements the EV3 direct-command wire format: tagged-operand encoding,
//! message framing, reply decoding, and blocking transports.

pub mod command;
mod error;
pub mod frame;
pub mod opcodes;
mod reply;
pub mod transport;

pub use command::DirectCommand;
pub use error::ProtocolError;
pub use reply::Reply;
pub use transport::{connect_tcp, open_serial, StreamTransport, Transport};

/// Default baud rate for serial device nodes.
///
/// RFCOMM device nodes ignore the setting, but the serial stack still
/// requires one.
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// Default timeout for reply reads in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;
