//! RankKV CLI Client
//!
//! Command-line interface for interacting with RankKV.
//!
//! ```text
//! rankkv-cli SET greeting hello
//! rankkv-cli ZADD leaderboard 1500 player1
//! rankkv-cli ZRANGE leaderboard 1000 1800
//! ```

use std::process::ExitCode;

use clap::Parser;
use rankkv::network::Client;
use rankkv::protocol::Command;

/// RankKV CLI
#[derive(Parser, Debug)]
#[command(name = "rankkv-cli")]
#[command(about = "CLI for the RankKV server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:1234")]
    server: String,

    /// Command name followed by its arguments, sent verbatim
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", args.server, e);
            return ExitCode::FAILURE;
        }
    };

    match client.execute(&Command::new(&args.command)) {
        Ok(response) if response.is_ok() => {
            println!("{}", response.text());
            ExitCode::SUCCESS
        }
        Ok(response) => {
            eprintln!("{}", response.text());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
