//! Direct-command builder
//!
//! Builds the opcode+operand byte sequence of a single direct command.
//!
//! Operand tagging follows the firmware's parameter grammar:
//! - local constants ("LCX") carry a width tag: values in -32..=31 fit the
//!   tag byte itself, wider values get `0x81`/`0x82`/`0x83` plus 1/2/4
//!   little-endian bytes
//! - strings ("LCS") are `0x84` plus the bytes plus a NUL terminator
//! - reply-slot references ("GVX") address a byte offset in the per-request
//!   global memory: offsets below 32 fit the tag byte (`0x60 | offset`),
//!   wider offsets get `0xE1`/`0xE2`/`0xE3` plus 1/2/4 little-endian bytes
//!
//! Several sub-operations may be appended to one builder; the firmware
//! executes them in order within a single round trip.

use byteorder::{ByteOrder, LittleEndian};

/// An ephemeral direct command: opcode and operand bytes plus the reply
/// allocation they reference.
///
/// The builder performs no range validation of operand values (speed
/// percentages, volumes, frequencies pass through untouched); firmware
/// behavior for out-of-range values is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct DirectCommand {
    ops: Vec<u8>,
    reply_len: u16,
}

impl DirectCommand {
    /// Create an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an opcode byte.
    pub fn op(mut self, opcode: u8) -> Self {
        self.ops.push(opcode);
        self
    }

    /// Append a raw byte (subcodes are sent untagged).
    pub fn raw(mut self, byte: u8) -> Self {
        self.ops.push(byte);
        self
    }

    /// Append a numeric operand in its tagged constant form.
    pub fn constant(mut self, value: i32) -> Self {
        if (-32..=31).contains(&value) {
            self.ops.push((value as u8) & 0x3F);
        } else if (i8::MIN as i32..=i8::MAX as i32).contains(&value) {
            self.ops.push(0x81);
            self.ops.push(value as u8);
        } else if (i16::MIN as i32..=i16::MAX as i32).contains(&value) {
            self.ops.push(0x82);
            let mut buf = [0u8; 2];
            LittleEndian::write_i16(&mut buf, value as i16);
            self.ops.extend_from_slice(&buf);
        } else {
            self.ops.push(0x83);
            let mut buf = [0u8; 4];
            LittleEndian::write_i32(&mut buf, value);
            self.ops.extend_from_slice(&buf);
        }
        self
    }

    /// Append a string operand: tag, bytes, NUL terminator.
    pub fn string(mut self, value: &str) -> Self {
        self.ops.push(0x84);
        self.ops.extend_from_slice(value.as_bytes());
        self.ops.push(0);
        self
    }

    /// Append a reply-slot reference at the given byte offset into the
    /// reply buffer, and grow the tracked allocation to cover a 4-byte
    /// value at that offset.
    pub fn global(mut self, offset: u32) -> Self {
        if offset < 32 {
            self.ops.push(0x60 | offset as u8);
        } else if offset < 256 {
            self.ops.push(0xE1);
            self.ops.push(offset as u8);
        } else if offset < 65536 {
            self.ops.push(0xE2);
            let mut buf = [0u8; 2];
            LittleEndian::write_u16(&mut buf, offset as u16);
            self.ops.extend_from_slice(&buf);
        } else {
            self.ops.push(0xE3);
            let mut buf = [0u8; 4];
            LittleEndian::write_u32(&mut buf, offset);
            self.ops.extend_from_slice(&buf);
        }
        let end = offset.saturating_add(4).min(u16::MAX as u32) as u16;
        self.reply_len = self.reply_len.max(end);
        self
    }

    /// Force the reply allocation to at least `bytes`.
    ///
    /// String replies allocate by a declared length operand rather than by
    /// the number of reply slots, so the automatic tracking from
    /// [`global`](Self::global) is not always enough.
    pub fn reserve_reply(mut self, bytes: u16) -> Self {
        self.reply_len = self.reply_len.max(bytes);
        self
    }

    /// The encoded opcode and operand bytes.
    pub fn ops(&self) -> &[u8] {
        &self.ops
    }

    /// The reply-buffer allocation in bytes this command requires.
    pub fn reply_len(&self) -> u16 {
        self.reply_len
    }
}
