//! Client
//!
//! Blocking client speaking the framed command protocol.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{RankError, Result};
use crate::protocol::{read_response, write_command, Command, Response, MAX_ARGS, MAX_FRAME_SIZE};

/// A connection to a RankKV server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    max_frame_size: usize,
    max_args: usize,
}

impl Client {
    /// Connect using the default protocol limits
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        Self::with_limits(addr, MAX_FRAME_SIZE, MAX_ARGS)
    }

    /// Connect with explicit limits (must match the server's)
    pub fn with_limits<A: ToSocketAddrs>(addr: A, max_frame_size: usize, max_args: usize) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
            max_frame_size,
            max_args,
        })
    }

    /// Send a command and wait for its response
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        self.send(command)?;
        self.receive()
    }

    /// Send a command without waiting; pair each call with `receive`
    pub fn send(&mut self, command: &Command) -> Result<()> {
        if command.is_empty() {
            return Err(RankError::EmptyCommand);
        }
        if command.len() > self.max_args {
            return Err(RankError::TooManyArguments {
                count: command.len(),
                max: self.max_args,
            });
        }

        write_command(&mut self.writer, command, self.max_frame_size)
    }

    /// Read the response to the oldest outstanding command
    pub fn receive(&mut self) -> Result<Response> {
        read_response(&mut self.reader, self.max_frame_size)
    }
}
