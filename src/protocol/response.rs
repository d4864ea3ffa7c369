//! Response definitions
//!
//! Represents responses to clients.

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Status {
    Ok = 0,
    Error = 1,
}

impl Status {
    /// Map a wire status code; every nonzero code is an error
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Status::Ok,
            _ => Status::Error,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Payload (value on success, `ERR ...` message on error)
    pub payload: Vec<u8>,
}

impl Response {
    /// Create an OK response
    pub fn ok(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload: payload.into(),
        }
    }

    /// Create an ERROR response; `message` gets the `ERR ` prefix
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Error,
            payload: format!("ERR {}", message).into_bytes(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Payload rendered as (lossy) UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}
