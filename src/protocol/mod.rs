//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//! All integers are unsigned 32-bit little-endian.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (4)  │     Payload (Len bytes)     │
//! └──────────┴─────────────────────────────┘
//! ```
//! `Len` never exceeds the configured maximum (4096 by default), in
//! either direction.
//!
//! ### Command Payload
//! ```text
//! ┌──────────┬──────────┬─────────┬──────────┬─────────┬─────┐
//! │Count (4) │ Len1 (4) │  Str1   │ Len2 (4) │  Str2   │ ... │
//! └──────────┴──────────┴─────────┴──────────┴─────────┴─────┘
//! ```
//!
//! ### Response Payload
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │Status(4) │          Payload            │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0: OK
//! - 1: ERROR (payload is an `ERR ...` message)

mod command;
mod response;
mod frame;
mod codec;

pub use command::Command;
pub use response::{Response, Status};
pub use frame::{read_frame, write_frame, LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE};
pub use codec::{
    encode_command, decode_command, encode_response, decode_response,
    read_command, write_command, read_response, write_response, MAX_ARGS,
};
