//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One thread per connection, or a fixed worker pool fed over a channel
//! - Commands routed through the Dispatcher
//! - Blocking client for tools and tests

mod server;
mod connection;
mod client;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use client::Client;
