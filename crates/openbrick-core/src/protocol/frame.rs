//! Message framing
//!
//! Wire format of a direct-command round trip:
//!
//! Request: `[u16 length][u16 counter][type][u16 allocation]` + ops, all
//! little-endian. The length counts everything after itself. The type byte
//! is [`DIRECT_COMMAND_REPLY`] or [`DIRECT_COMMAND_NO_REPLY`]. The
//! allocation word packs `(locals << 10) | globals`; this library never
//! allocates locals.
//!
//! Reply: `[u16 length][u16 counter][status]` + global memory. The counter
//! must echo the request's; status is [`DIRECT_REPLY`] on success.

use byteorder::{ByteOrder, LittleEndian};

use super::ProtocolError;

/// Request type byte: a reply is expected
pub const DIRECT_COMMAND_REPLY: u8 = 0x00;
/// Request type byte: fire and forget
pub const DIRECT_COMMAND_NO_REPLY: u8 = 0x80;
/// Reply status byte: command executed
pub const DIRECT_REPLY: u8 = 0x02;
/// Reply status byte: firmware rejected or failed the command
pub const DIRECT_REPLY_ERROR: u8 = 0x04;

/// Largest reply allocation a direct command may request.
///
/// The firmware's reply buffer is 1024 bytes including the 5-byte header.
pub const MAX_GLOBAL_BYTES: u16 = 1019;

/// Bytes of reply header after the length word (counter + status)
const REPLY_HEADER: usize = 3;

/// Encode a complete request frame.
///
/// `reply_len` is the global-memory allocation the command's reply slots
/// reference; `want_reply` selects the type byte.
pub fn encode_request(
    counter: u16,
    ops: &[u8],
    reply_len: u16,
    want_reply: bool,
) -> Result<Vec<u8>, ProtocolError> {
    if reply_len > MAX_GLOBAL_BYTES {
        return Err(ProtocolError::ReplyAllocationTooLarge(reply_len));
    }

    // counter(2) + type(1) + allocation(2) + ops
    let length = ops.len() + 5;
    if length > u16::MAX as usize {
        return Err(ProtocolError::CommandTooLarge(ops.len()));
    }

    let mut frame = Vec::with_capacity(length + 2);
    let mut word = [0u8; 2];

    LittleEndian::write_u16(&mut word, length as u16);
    frame.extend_from_slice(&word);

    LittleEndian::write_u16(&mut word, counter);
    frame.extend_from_slice(&word);

    frame.push(if want_reply {
        DIRECT_COMMAND_REPLY
    } else {
        DIRECT_COMMAND_NO_REPLY
    });

    // locals are always 0, so the allocation word is just the globals
    LittleEndian::write_u16(&mut word, reply_len);
    frame.extend_from_slice(&word);

    frame.extend_from_slice(ops);
    Ok(frame)
}

/// Decode a reply frame (with the leading length word already stripped)
/// into the global-memory bytes.
///
/// Fails hard on a short frame, a counter mismatch, or an error status —
/// there is no partial decode.
pub fn decode_reply(frame: &[u8], counter: u16, reply_len: u16) -> Result<Vec<u8>, ProtocolError> {
    let expected = REPLY_HEADER + reply_len as usize;
    if frame.len() < REPLY_HEADER {
        return Err(ProtocolError::ReplyTooShort {
            expected,
            actual: frame.len(),
        });
    }

    let received = LittleEndian::read_u16(&frame[0..2]);
    if received != counter {
        return Err(ProtocolError::CounterMismatch {
            sent: counter,
            received,
        });
    }

    let status = frame[2];
    if status != DIRECT_REPLY {
        return Err(ProtocolError::CommandFailed { status });
    }

    let data = &frame[REPLY_HEADER..];
    if data.len() < reply_len as usize {
        return Err(ProtocolError::ReplyTooShort {
            expected,
            actual: frame.len(),
        });
    }

    Ok(data[..reply_len as usize].to_vec())
}
