//! RankKV Server Binary
//!
//! Starts the TCP server for RankKV.

use std::sync::Arc;

use clap::Parser;
use rankkv::network::Server;
use rankkv::{Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// RankKV Server
#[derive(Parser, Debug)]
#[command(name = "rankkv-server")]
#[command(about = "In-memory key-value and sorted-set server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:1234")]
    listen: String,

    /// Serve connections from a fixed pool of worker threads
    /// instead of one thread per connection
    #[arg(short, long)]
    workers: Option<usize>,

    /// Largest frame accepted or sent, in bytes
    #[arg(long, default_value_t = rankkv::protocol::MAX_FRAME_SIZE)]
    max_frame_size: usize,

    /// Largest number of strings per command
    #[arg(long, default_value_t = rankkv::protocol::MAX_ARGS)]
    max_args: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rankkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("RankKV Server v{}", rankkv::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let mut builder = Config::builder()
        .listen_addr(&args.listen)
        .max_frame_size(args.max_frame_size)
        .max_args(args.max_args);
    if let Some(workers) = args.workers {
        builder = builder.worker_threads(workers);
    }
    let config = builder.build();

    let store = Arc::new(Store::new());
    let mut server = Server::new(config, store);

    if let Err(e) = server.bind() {
        tracing::error!("Failed to bind {}: {}", args.listen, e);
        std::process::exit(1);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
