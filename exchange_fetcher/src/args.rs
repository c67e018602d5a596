//! Command-line arguments for the exchange fetcher.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use exchange_common::config::EnvArgs;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Serve requests from the message queue instead of answering a single request.
    #[clap(long)]
    pub mq: bool,

    /// Request for single-shot mode: a JSON object with an `indices` array of symbols,
    /// or symbols separated by commas, semicolons or spaces.
    #[clap(long, default_value = "{}")]
    pub indices: String,

    #[clap(flatten)]
    pub env: EnvArgs,
}
