//! Blocking transports
//!
//! A transport carries framed direct commands to the brick and returns the
//! reply's global memory. All I/O is synchronous and blocking; one brick
//! owns one transport exclusively (spec: no concurrent requests).
//!
//! Connection setup beyond opening the byte stream (Bluetooth pairing, USB
//! enumeration, WiFi unlock handshakes) is outside this library.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use byteorder::{ByteOrder, LittleEndian};
use serialport::SerialPort;
use tracing::trace;

use super::{frame, ProtocolError, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT_MS};

/// TCP port the brick's network mode listens on
pub const TCP_PORT: u16 = 5555;

/// A single-primitive boundary to the brick.
///
/// `reply_len == 0` means fire-and-forget: the command is sent with the
/// no-reply type byte and nothing is read back.
pub trait Transport {
    /// Send one direct command and return the reply's global-memory bytes
    /// (empty for fire-and-forget commands).
    fn send_direct_command(&mut self, ops: &[u8], reply_len: u16)
        -> Result<Vec<u8>, ProtocolError>;
}

/// Framing and message-counter bookkeeping over any blocking byte stream.
pub struct StreamTransport<S: Read + Write> {
    stream: S,
    counter: u16,
}

impl<S: Read + Write> StreamTransport<S> {
    /// Wrap an already-open byte stream.
    pub fn new(stream: S) -> Self {
        Self { stream, counter: 0 }
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn send_direct_command(
        &mut self,
        ops: &[u8],
        reply_len: u16,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.counter = self.counter.wrapping_add(1);
        let want_reply = reply_len > 0;

        let request = frame::encode_request(self.counter, ops, reply_len, want_reply)?;
        trace!(
            counter = self.counter,
            bytes = request.len(),
            reply_len,
            "sending direct command"
        );
        self.stream.write_all(&request)?;
        self.stream.flush()?;

        if !want_reply {
            return Ok(Vec::new());
        }

        let mut length = [0u8; 2];
        self.stream.read_exact(&mut length)?;
        let frame_len = LittleEndian::read_u16(&length) as usize;

        let mut reply = vec![0u8; frame_len];
        self.stream.read_exact(&mut reply)?;
        trace!(counter = self.counter, bytes = frame_len, "received reply");

        frame::decode_reply(&reply, self.counter, reply_len)
    }
}

/// Open a serial device node (Bluetooth RFCOMM binding or USB serial
/// gadget) as a transport.
pub fn open_serial(
    path: &str,
    baud_rate: Option<u32>,
) -> Result<StreamTransport<Box<dyn SerialPort>>, ProtocolError> {
    let port = serialport::new(path, baud_rate.unwrap_or(DEFAULT_BAUD_RATE))
        .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
        .open()
        .map_err(|e| ProtocolError::SerialError(e.to_string()))?;
    Ok(StreamTransport::new(port))
}

/// Connect to a brick over the network on [`TCP_PORT`].
pub fn connect_tcp(host: &str) -> Result<StreamTransport<TcpStream>, ProtocolError> {
    let stream = TcpStream::connect((host, TCP_PORT))?;
    stream.set_read_timeout(Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)))?;
    stream.set_nodelay(true)?;
    Ok(StreamTransport::new(stream))
}
