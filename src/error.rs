//! Error types for RankKV
//!
//! Provides a unified error type for all operations.
//!
//! Errors fall into two tiers:
//! - **Fatal** (transport and codec): the affected connection is closed.
//! - **Recoverable** (command semantics): reported to the client as a
//!   status 1 response and the connection keeps serving requests.
//!
//! Command-tier variants display exactly the text sent after `"ERR "`.

use thiserror::Error;

/// Result type alias using RankError
pub type Result<T> = std::result::Result<T, RankError>;

/// Unified error type for RankKV operations
#[derive(Debug, Error)]
pub enum RankError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Command too short")]
    CommandTooShort,

    #[error("Empty command")]
    EmptyCommand,

    #[error("Too many arguments: {count} (max {max})")]
    TooManyArguments { count: usize, max: usize },

    #[error("Truncated command")]
    Truncated,

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("unknown command")]
    UnknownCommand(String),

    #[error("wrong number of arguments for '{}' command", .0.to_lowercase())]
    WrongArity(String),

    #[error("value not found")]
    ValueNotFound,

    #[error("key not found")]
    KeyNotFound,

    #[error("member not found")]
    MemberNotFound,

    #[error("invalid score")]
    InvalidScore,

    #[error("invalid increment")]
    InvalidIncrement,

    #[error("resulting score is not a number")]
    ScoreNotANumber,

    #[error("invalid min score")]
    InvalidMinScore,

    #[error("invalid max score")]
    InvalidMaxScore,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RankError {
    /// Whether this error must terminate the connection it occurred on
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RankError::Connection(_)
                | RankError::FrameTooLarge { .. }
                | RankError::CommandTooShort
                | RankError::EmptyCommand
                | RankError::TooManyArguments { .. }
                | RankError::Truncated
                | RankError::Protocol(_)
        )
    }

    /// Whether this is a clean disconnect by the peer rather than a failure
    pub fn is_disconnect(&self) -> bool {
        match self {
            RankError::Connection(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
