//! Dispatcher Module
//!
//! Routes decoded commands to their handlers.
//!
//! ## Responsibilities
//! - Resolve the command name against a fixed table (exact, case-sensitive)
//! - Validate arity before any handler runs
//! - Turn every semantic failure into a status 1 `ERR ...` response
//!
//! ## Commands
//! ```text
//! GET key                      -> value
//! SET key value                -> OK
//! DEL key                      -> OK
//! ZADD key score member        -> OK
//! ZREM key member              -> OK
//! ZSCORE key member            -> score
//! ZRANGE key min max           -> [member:score,...]
//! ZINCRBY key increment member -> new score
//! ```

use std::sync::Arc;

use crate::error::{RankError, Result};
use crate::protocol::{Command, Response};
use crate::store::Store;
use crate::zset::ZSetEntry;

/// Handler signature: the store and every part of the command, name included.
/// Arity has already been checked when a handler runs.
type Handler = fn(&Store, &[Vec<u8>]) -> Result<Vec<u8>>;

/// One command table entry
struct CommandSpec {
    name: &'static str,
    /// Required number of parts, name included
    arity: usize,
    handler: Handler,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "GET", arity: 2, handler: handle_get },
    CommandSpec { name: "SET", arity: 3, handler: handle_set },
    CommandSpec { name: "DEL", arity: 2, handler: handle_del },
    CommandSpec { name: "ZADD", arity: 4, handler: handle_zadd },
    CommandSpec { name: "ZREM", arity: 3, handler: handle_zrem },
    CommandSpec { name: "ZSCORE", arity: 3, handler: handle_zscore },
    CommandSpec { name: "ZRANGE", arity: 4, handler: handle_zrange },
    CommandSpec { name: "ZINCRBY", arity: 4, handler: handle_zincrby },
];

const OK: &[u8] = b"OK";

/// Executes commands against a shared store
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<Store>,
}

impl Dispatcher {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Execute a command and return a response
    ///
    /// Never fails: errors are reported in the response.
    pub fn dispatch(&self, command: &Command) -> Response {
        match self.execute(command) {
            Ok(payload) => Response::ok(payload),
            Err(e) => Response::error(e),
        }
    }

    /// Execute a command, surfacing the error instead of a response
    pub fn execute(&self, command: &Command) -> Result<Vec<u8>> {
        let name = command.name();
        let spec = COMMANDS
            .iter()
            .find(|spec| spec.name.as_bytes() == name)
            .ok_or_else(|| RankError::UnknownCommand(String::from_utf8_lossy(name).into_owned()))?;

        if command.len() != spec.arity {
            return Err(RankError::WrongArity(spec.name.to_string()));
        }

        (spec.handler)(&self.store, command.parts())
    }

    /// The store commands run against
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

// =============================================================================
// Argument Parsing
// =============================================================================

/// Parse a score argument, rejecting NaN
fn parse_score(arg: &[u8]) -> Option<f64> {
    std::str::from_utf8(arg)
        .ok()?
        .parse::<f64>()
        .ok()
        .filter(|score| !score.is_nan())
}

/// Render a score with exactly one fractional digit
fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

fn format_range(entries: &[ZSetEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + entries.len() * 16);
    out.push(b'[');
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(&entry.member);
        out.push(b':');
        out.extend_from_slice(format_score(entry.score).as_bytes());
    }
    out.push(b']');
    out
}

// =============================================================================
// Key/Value Handlers
// =============================================================================

fn handle_get(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    store.get(&args[1]).ok_or(RankError::ValueNotFound)
}

fn handle_set(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    store.set(args[1].as_slice(), args[2].as_slice());
    Ok(OK.to_vec())
}

fn handle_del(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    store.delete(&args[1]);
    Ok(OK.to_vec())
}

// =============================================================================
// Sorted Set Handlers
// =============================================================================

fn handle_zadd(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    let score = parse_score(&args[2]).ok_or(RankError::InvalidScore)?;

    store.sorted_set_or_create(&args[1]).add(score, args[3].as_slice());
    Ok(OK.to_vec())
}

fn handle_zrem(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    let set = store.sorted_set(&args[1]).ok_or(RankError::KeyNotFound)?;

    if !set.remove(&args[2]) {
        return Err(RankError::MemberNotFound);
    }
    Ok(OK.to_vec())
}

fn handle_zscore(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    let set = store.sorted_set(&args[1]).ok_or(RankError::KeyNotFound)?;
    let score = set.score(&args[2]).ok_or(RankError::MemberNotFound)?;

    Ok(format_score(score).into_bytes())
}

fn handle_zrange(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    let min = parse_score(&args[2]).ok_or(RankError::InvalidMinScore)?;
    let max = parse_score(&args[3]).ok_or(RankError::InvalidMaxScore)?;
    let set = store.sorted_set(&args[1]).ok_or(RankError::KeyNotFound)?;

    Ok(format_range(&set.range(min, max)))
}

fn handle_zincrby(store: &Store, args: &[Vec<u8>]) -> Result<Vec<u8>> {
    let delta = parse_score(&args[2]).ok_or(RankError::InvalidIncrement)?;

    let score = store
        .sorted_set_or_create(&args[1])
        .increment(delta, args[3].as_slice())
        .ok_or(RankError::ScoreNotANumber)?;
    Ok(format_score(score).into_bytes())
}
