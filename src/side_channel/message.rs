// Side-channel message primitives
//
// Every value is little-endian:
// int32 (4 bytes), float32 (4 bytes), bool (1 byte),
// string = int32 byte length + UTF-8 bytes,
// float32 list = int32 count + count float32 values.

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Error types for reading side-channel messages
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MessageError {
    #[error("Message truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("String is not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, MessageError>;

/// Outbound message, built by appending primitives in wire order
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    buffer: BytesMut,
}

impl OutgoingMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_int32(&mut self, value: i32) {
        self.buffer.put_i32_le(value);
    }

    pub fn write_float32(&mut self, value: f32) {
        self.buffer.put_f32_le(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.put_u8(value as u8);
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_string(&mut self, value: &str) {
        self.buffer.reserve(4 + value.len());
        self.buffer.put_i32_le(value.len() as i32);
        self.buffer.put_slice(value.as_bytes());
    }

    /// Write an int32 count followed by each value
    pub fn write_float32_list(&mut self, values: &[f32]) {
        self.buffer.reserve(4 + 4 * values.len());
        self.buffer.put_i32_le(values.len() as i32);
        for &v in values {
            self.buffer.put_f32_le(v);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Inbound message, consumed front to back
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    buffer: Bytes,
}

impl IncomingMessage {
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            buffer: buffer.into(),
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.buffer.remaining();
        if remaining < needed {
            return Err(MessageError::Truncated { needed, remaining });
        }
        Ok(())
    }

    fn read_length(&mut self) -> Result<usize> {
        let len = self.read_int32()?;
        usize::try_from(len).map_err(|_| MessageError::NegativeLength(len))
    }

    pub fn read_int32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buffer.get_i32_le())
    }

    pub fn read_float32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.buffer.get_f32_le())
    }

    /// Any non-zero byte reads as true
    pub fn read_bool(&mut self) -> Result<bool> {
        self.ensure(1)?;
        Ok(self.buffer.get_u8() != 0)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_length()?;
        self.ensure(len)?;
        let raw = self.buffer.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|_| MessageError::InvalidUtf8)
    }

    pub fn read_float32_list(&mut self) -> Result<Vec<f32>> {
        let len = self.read_length()?;
        self.ensure(len.saturating_mul(4))?;
        Ok((0..len).map(|_| self.buffer.get_f32_le()).collect())
    }

    /// Read a fixed number of float32 values (no length prefix)
    pub fn read_float32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        self.ensure(4 * N)?;
        let mut out = [0.0f32; N];
        for v in &mut out {
            *v = self.buffer.get_f32_le();
        }
        Ok(out)
    }
}

impl From<OutgoingMessage> for IncomingMessage {
    fn from(msg: OutgoingMessage) -> Self {
        Self::new(msg.into_bytes())
    }
}
