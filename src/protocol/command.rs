//! Command definitions
//!
//! A command is an ordered list of byte strings; the first is its name.

use std::fmt;

/// A command as carried on the wire
#[derive(Clone, PartialEq, Eq)]
pub struct Command {
    parts: Vec<Vec<u8>>,
}

impl Command {
    /// Build a command from its name followed by its arguments
    pub fn new<I, T>(parts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Self {
            parts: parts.into_iter().map(|p| p.as_ref().to_vec()).collect(),
        }
    }

    /// Wrap already-owned parts
    pub fn from_parts(parts: Vec<Vec<u8>>) -> Self {
        Self { parts }
    }

    /// The command name (empty for a command with no parts)
    pub fn name(&self) -> &[u8] {
        self.parts.first().map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// All parts, name included
    pub fn parts(&self) -> &[Vec<u8>] {
        &self.parts
    }

    /// Number of parts, name included (the command's arity)
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<Vec<u8>> {
        self.parts
    }
}

impl fmt::Debug for Command {
    // Render parts as (lossy) text so trace logs stay readable
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.parts.iter().map(|p| String::from_utf8_lossy(p)))
            .finish()
    }
}
