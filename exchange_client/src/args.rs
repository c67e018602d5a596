//! Command-line arguments for the exchange client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use exchange_common::SymbolList;
use exchange_common::config::EnvArgs;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Symbols to request, separated by commas, semicolons or spaces.
    #[clap(long, required_unless_present = "path")]
    pub indices: Option<SymbolList>,

    /// Path to a text file with symbols to request.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long, conflicts_with = "indices")]
    pub path: Option<String>,

    /// Seconds to wait for the result before giving up.
    #[clap(long, default_value_t = 15)]
    pub wait_secs: u64,

    #[clap(flatten)]
    pub env: EnvArgs,
}
