//! Exchange Client — asks a running fetcher for quotes over the message queue and prints
//! the result. It publishes a `{"indices":[...]}` request on the request queue, then waits
//! for the next encoded result set on the result queue.
//!
//! Usage example (CLI):
//! ```bash
//! exchange_client --indices "AAPL, GOOGL" --wait-secs 30
//! exchange_client --path ./indices.txt
//! ```
//!
//! Queue settings are read from the environment, like the fetcher's.
#![warn(missing_docs)]
mod args;
mod sender;

use crate::args::Args;
use crate::sender::RequestSender;
use clap::Parser;
use exchange_common::config::QueueConfig;
use exchange_common::indices::SymbolParser;
use exchange_common::queue::RedisQueue;
use exchange_common::{FetcherError, Result, SymbolList};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

fn main() -> Result<(), FetcherError> {
    init_logger();
    let args = Args::parse();
    args.env.load()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| FetcherError::Config(format!("cannot set Ctrl+C handler: {}", e)))?;
    }

    let symbols = read_symbols(&args)?;
    let config = QueueConfig::from_env()?;
    let mut queue = RedisQueue::connect(&config.url()?, &config.result_queue)?;

    RequestSender::send_request(&mut queue, &config.request_queue, &symbols)?;

    let wait = Duration::from_secs(args.wait_secs);
    match RequestSender::wait_for_result(&mut queue, wait, shutdown)? {
        Some(result) => {
            println!("{}", String::from_utf8_lossy(&result));
            Ok(())
        }
        None => {
            warn!("No result received on '{}'", config.result_queue);
            Err(FetcherError::ChannelRecv(format!(
                "no result within {}s",
                args.wait_secs
            )))
        }
    }
}

/// Takes the symbols from `--indices`, or reads them from the `--path` file.
fn read_symbols(args: &Args) -> Result<SymbolList, FetcherError> {
    if let Some(symbols) = &args.indices {
        return Ok(symbols.clone());
    }

    let path = args.path.as_deref().map(normalize_path).unwrap_or_default();
    let file = File::open(&path)?;
    let symbols = SymbolList::parse_from_file(BufReader::new(file))?;
    if symbols.is_empty() {
        return Err(FetcherError::EmptySymbolList);
    }
    info!("Symbols from {}: {}", path.display(), symbols);
    Ok(symbols)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
