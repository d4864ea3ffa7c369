//! # RankKV
//!
//! An in-memory data server with:
//! - A flat key/value namespace
//! - Named sorted sets with score-range queries
//! - A length-prefixed binary protocol over TCP
//! - Many connections mutating shared state under reader-writer locks
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (one thread per connection)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ frames
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Framing + Command Codec                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ commands
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Dispatcher                               │
//! │              (arity check, handler table)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Key/Value  │          │ Sorted Sets │
//!   │    (Store   │          │  (RwLock    │
//!   │   RwLock)   │          │   per set)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod zset;
pub mod store;
pub mod dispatcher;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RankError, Result};
pub use config::Config;
pub use store::Store;
pub use dispatcher::Dispatcher;
pub use zset::{SortedSet, ZSetEntry};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of RankKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
