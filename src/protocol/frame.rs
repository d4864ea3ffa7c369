//! Framing layer
//!
//! Reads and writes length-prefixed messages over a byte stream.

use std::io::{Read, Write};

use crate::error::{RankError, Result};

/// Size of the little-endian length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum frame payload size (4 KB)
pub const MAX_FRAME_SIZE: usize = 4096;

/// Read one complete frame from a stream
///
/// The declared length is checked before any payload byte is consumed.
/// Blocks until the whole payload has arrived; a short read surfaces as
/// `UnexpectedEof`.
pub fn read_frame<R: Read>(reader: &mut R, max_frame_size: usize) -> Result<Vec<u8>> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    reader.read_exact(&mut prefix)?;

    let len = u32::from_le_bytes(prefix) as usize;
    if len > max_frame_size {
        return Err(RankError::FrameTooLarge {
            size: len,
            max: max_frame_size,
        });
    }

    let mut payload = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(payload)
}

/// Write one complete frame to a stream and flush it
///
/// Nothing is written when the payload is over the limit.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8], max_frame_size: usize) -> Result<()> {
    if payload.len() > max_frame_size {
        return Err(RankError::FrameTooLarge {
            size: payload.len(),
            max: max_frame_size,
        });
    }

    writer.write_all(&(payload.len() as u32).to_le_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}
