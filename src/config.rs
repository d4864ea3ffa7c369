//! Configuration for RankKV
//!
//! Centralized configuration with sensible defaults.

use crate::error::{RankError, Result};
use crate::protocol::{MAX_ARGS, MAX_FRAME_SIZE};

/// Main configuration for a RankKV server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Worker threads serving connections.
    /// `None` spawns one thread per accepted connection.
    pub worker_threads: Option<usize>,

    /// Connection read timeout (milliseconds, 0 = disabled)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = disabled)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest frame accepted or produced, in bytes (excluding the length prefix)
    pub max_frame_size: usize,

    /// Largest number of strings in one command, including its name
    pub max_args: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:1234".to_string(),
            worker_threads: None,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            max_frame_size: MAX_FRAME_SIZE,
            max_args: MAX_ARGS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_args == 0 {
            return Err(RankError::Config("max_args must be at least 1".to_string()));
        }
        // A response needs room for its status word
        if self.max_frame_size < 4 {
            return Err(RankError::Config(format!(
                "max_frame_size must be at least 4 bytes, got {}",
                self.max_frame_size
            )));
        }
        if self.max_frame_size > u32::MAX as usize {
            return Err(RankError::Config(format!(
                "max_frame_size {} does not fit the 32-bit length prefix",
                self.max_frame_size
            )));
        }
        if self.worker_threads == Some(0) {
            return Err(RankError::Config("worker_threads must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Serve connections from a fixed pool of `count` workers
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.config.worker_threads = Some(count);
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the maximum frame size (in bytes)
    pub fn max_frame_size(mut self, size: usize) -> Self {
        self.config.max_frame_size = size;
        self
    }

    /// Set the maximum number of strings per command
    pub fn max_args(mut self, count: usize) -> Self {
        self.config.max_args = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
