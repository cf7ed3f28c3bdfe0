//! Length-prefixed codec for command snapshots
//!
//! Snapshots are framed as:
//! ```text
//! [ 4 bytes: length (u32, big-endian) ][ N bytes: JSON CommandRecord ]
//! ```
//!
//! so a stream or file of snapshots can be split back into records.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::{CommandMapping, CommandRecord};

/// Maximum record size (1 MB)
pub const MAX_RECORD_SIZE: u32 = 1024 * 1024;

const LENGTH_PREFIX: usize = 4;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Record too large: {0} bytes (max: {MAX_RECORD_SIZE})")]
    RecordTooLarge(usize),

    #[error("Invalid record length prefix: {0}")]
    InvalidLength(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a snapshot into a length-prefixed byte buffer
pub fn encode(mapping: &CommandMapping) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::new();
    encode_into(mapping, &mut buf)?;
    Ok(buf.freeze())
}

/// Encode a snapshot directly into a provided buffer
pub fn encode_into(mapping: &CommandMapping, buf: &mut BytesMut) -> Result<(), CodecError> {
    encode_record_into(&mapping.to_record(), buf)
}

/// Encode an already-owned record into a provided buffer
pub fn encode_record_into(record: &CommandRecord, buf: &mut BytesMut) -> Result<(), CodecError> {
    let payload = serde_json::to_vec(record)?;

    if payload.len() > MAX_RECORD_SIZE as usize {
        return Err(CodecError::RecordTooLarge(payload.len()));
    }

    buf.reserve(LENGTH_PREFIX + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.put_slice(&payload);

    Ok(())
}

/// Try to decode a length-prefixed record from a buffer
///
/// Returns:
/// - `Ok(Some(record))` if a complete record was decoded
/// - `Ok(None)` if more data is needed
/// - `Err(...)` if the data is invalid
pub fn decode(buf: &mut BytesMut) -> Result<Option<CommandRecord>, CodecError> {
    if buf.len() < LENGTH_PREFIX {
        return Ok(None);
    }

    // Peek at the length prefix without consuming
    let record_len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);

    if record_len > MAX_RECORD_SIZE {
        return Err(CodecError::InvalidLength(record_len));
    }

    let total_len = LENGTH_PREFIX + record_len as usize;
    if buf.len() < total_len {
        return Ok(None);
    }

    buf.advance(LENGTH_PREFIX);
    let payload = buf.split_to(record_len as usize);

    Ok(Some(serde_json::from_slice(&payload)?))
}

/// Decoder state machine for streaming decoding
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Partial frame data being accumulated
    buffer: BytesMut,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
        }
    }

    /// Add data to the decoder buffer
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode the next frame from the buffer
    ///
    /// Call this repeatedly until it returns `Ok(None)` to drain all complete frames
    pub fn decode_next(&mut self) -> Result<Option<CommandRecord>, CodecError> {
        decode(&mut self.buffer)
    }

    /// Bytes waiting for the rest of their frame
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}

/// Encoder for building frames
#[derive(Debug, Default)]
pub struct FrameEncoder {
    buffer: BytesMut,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
        }
    }

    /// Encode a snapshot and add it to the output buffer
    pub fn encode(&mut self, mapping: &CommandMapping) -> Result<(), CodecError> {
        encode_into(mapping, &mut self.buffer)
    }

    /// Take the encoded bytes, leaving an empty buffer
    pub fn take(&mut self) -> Bytes {
        self.buffer.split().freeze()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
