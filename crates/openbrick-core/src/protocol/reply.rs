//! Reply decoding
//!
//! A reply buffer is not self-describing: the offsets and types come from
//! the reply-slot declarations of the command that was sent. Decoding is
//! purely positional, and any access past the buffer end is a hard error.

use byteorder::{ByteOrder, LittleEndian};

use super::ProtocolError;

/// The global-memory bytes returned for one direct command.
#[derive(Debug, Clone)]
pub struct Reply {
    data: Vec<u8>,
}

impl Reply {
    /// Wrap the returned global-memory bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Decode a 4-byte little-endian float at the given offset.
    pub fn float_at(&self, offset: usize) -> Result<f32, ProtocolError> {
        let slice = self.slice(offset, 4)?;
        Ok(LittleEndian::read_f32(slice))
    }

    /// Decode a 4-byte little-endian signed integer at the given offset.
    pub fn int_at(&self, offset: usize) -> Result<i32, ProtocolError> {
        let slice = self.slice(offset, 4)?;
        Ok(LittleEndian::read_i32(slice))
    }

    /// Decode a fixed-width ASCII string at the given offset.
    ///
    /// The string is NUL-terminated within its allocation; the first NUL
    /// and everything after it are stripped.
    pub fn string_at(&self, offset: usize, len: usize) -> Result<String, ProtocolError> {
        let slice = self.slice(offset, len)?;
        let text = match slice.iter().position(|&b| b == 0) {
            Some(nul) => &slice[..nul],
            None => slice,
        };
        if !text.is_ascii() {
            return Err(ProtocolError::NonAsciiReply);
        }
        // is_ascii implies valid UTF-8
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&[u8], ProtocolError> {
        let end = offset.checked_add(len).ok_or(ProtocolError::DecodeOutOfRange {
            offset,
            len: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(ProtocolError::DecodeOutOfRange {
                offset,
                len: self.data.len(),
            });
        }
        Ok(&self.data[offset..end])
    }
}
