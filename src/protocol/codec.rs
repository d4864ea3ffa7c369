//! Protocol codec
//!
//! Encoding and decoding functions for frame payloads.
//!
//! ## Wire Format
//!
//! ### Command
//! ```text
//! count (4) + [len (4) + bytes] * count
//! ```
//!
//! ### Response
//! ```text
//! status (4) + payload
//! ```

use std::io::{Read, Write};

use bytes::{Buf, BufMut};

use crate::error::{RankError, Result};
use super::frame::{read_frame, write_frame};
use super::{Command, Response, Status};

/// Default maximum number of strings in one command
pub const MAX_ARGS: usize = 10;

/// Size of a string length or count field
const FIELD_SIZE: usize = 4;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command payload
///
/// Format: count (4) + for each part: len (4) + bytes
pub fn encode_command(command: &Command) -> Vec<u8> {
    let body: usize = command.parts().iter().map(|p| FIELD_SIZE + p.len()).sum();

    let mut payload = Vec::with_capacity(FIELD_SIZE + body);
    payload.put_u32_le(command.len() as u32);
    for part in command.parts() {
        payload.put_u32_le(part.len() as u32);
        payload.put_slice(part);
    }

    payload
}

/// Decode a command payload
///
/// Bytes following the last declared string are ignored.
pub fn decode_command(bytes: &[u8], max_args: usize) -> Result<Command> {
    if bytes.len() < FIELD_SIZE {
        return Err(RankError::CommandTooShort);
    }

    let mut buf = bytes;
    let count = buf.get_u32_le() as usize;

    if count == 0 {
        return Err(RankError::EmptyCommand);
    }
    if count > max_args {
        return Err(RankError::TooManyArguments {
            count,
            max: max_args,
        });
    }

    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        if buf.remaining() < FIELD_SIZE {
            return Err(RankError::Truncated);
        }
        let len = buf.get_u32_le() as usize;

        if buf.remaining() < len {
            return Err(RankError::Truncated);
        }
        parts.push(buf[..len].to_vec());
        buf.advance(len);
    }

    Ok(Command::from_parts(parts))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response payload
///
/// Format: status (4) + payload
pub fn encode_response(response: &Response) -> Vec<u8> {
    let mut message = Vec::with_capacity(FIELD_SIZE + response.payload.len());
    message.put_u32_le(response.status.code());
    message.put_slice(&response.payload);
    message
}

/// Decode a response payload
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    if bytes.len() < FIELD_SIZE {
        return Err(RankError::Protocol(format!(
            "Incomplete response: expected at least {} bytes, got {}",
            FIELD_SIZE,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    let status = Status::from_code(buf.get_u32_le());

    Ok(Response {
        status,
        payload: buf.to_vec(),
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read and decode one command frame
pub fn read_command<R: Read>(reader: &mut R, max_frame_size: usize, max_args: usize) -> Result<Command> {
    let payload = read_frame(reader, max_frame_size)?;
    decode_command(&payload, max_args)
}

/// Encode and write one command frame
pub fn write_command<W: Write>(writer: &mut W, command: &Command, max_frame_size: usize) -> Result<()> {
    write_frame(writer, &encode_command(command), max_frame_size)
}

/// Read and decode one response frame
pub fn read_response<R: Read>(reader: &mut R, max_frame_size: usize) -> Result<Response> {
    let payload = read_frame(reader, max_frame_size)?;
    decode_response(&payload)
}

/// Encode and write one response frame
pub fn write_response<W: Write>(writer: &mut W, response: &Response, max_frame_size: usize) -> Result<()> {
    write_frame(writer, &encode_response(response), max_frame_size)
}
