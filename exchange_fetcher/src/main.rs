//! Exchange fetcher.
//!
//! This binary fetches index quotes from the quote provider for a list of symbols and
//! republishes them as a normalized JSON object keyed by display name. It runs in one of two
//! modes, chosen at startup:
//!
//! - Single-shot (default) — splits the `--indices` payload, runs the pipeline once and
//!   prints the encoded result to stdout. A failed request exits with a non-zero status.
//! - Streaming (`--mq`) — connects to the request and result queues, then serves requests
//!   one at a time until the process is stopped. A failed request is logged and skipped.
//!
//! Configuration comes from the environment, optionally seeded from a dotenv file
//! (`--env-file`, or `.env` when present). See `exchange_common::config` for the keys.
//!
//! Usage example (CLI):
//! ```bash
//! exchange_fetcher --indices '{"indices":["^N225","^BVSP"]}'
//! exchange_fetcher --mq --env-file ./fetcher.env
//! ```
#![warn(missing_docs)]
mod args;
mod receiver;

use crate::args::Args;
use crate::receiver::QueueEndpoints;
use clap::Parser;
use exchange_common::config::{ProviderConfig, QueueConfig};
use exchange_common::fetcher::HttpFetcher;
use exchange_common::orchestrator::spawn_receiver;
use exchange_common::url_builder::UrlBuilder;
use exchange_common::{FetcherError, Orchestrator, Result};
use log::{error, info};
use std::io::Write;

fn main() -> Result<(), FetcherError> {
    init_logger();
    let args = Args::parse();
    args.env.load()?;

    let provider = ProviderConfig::from_env()?;
    let orchestrator = Orchestrator::new(
        UrlBuilder::new(&provider.url_template)?,
        HttpFetcher::new(provider.http_timeout)?,
    );

    if args.mq {
        run_on_queue(&orchestrator)
    } else {
        run_single(&orchestrator, &args.indices)
    }
}

/// Answers one request from the command line and writes the result to stdout.
fn run_single(orchestrator: &Orchestrator<HttpFetcher>, payload: &str) -> Result<(), FetcherError> {
    match orchestrator.process(payload.as_bytes()) {
        Ok(encoded) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&encoded)?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
        Err(failure) => {
            error!("Request failed: {}", failure);
            Err(failure.error)
        }
    }
}

/// Serves requests from the request queue until the receiver stops.
fn run_on_queue(orchestrator: &Orchestrator<HttpFetcher>) -> Result<(), FetcherError> {
    let queues = QueueConfig::from_env()?;
    let QueueEndpoints {
        requests,
        mut results,
        result_queue,
    } = QueueEndpoints::open(&queues)?;

    let (request_rx, receiver) = spawn_receiver(requests);
    info!("Waiting for indices. Press Ctrl+C to exit.");

    orchestrator.serve(request_rx, &mut results, &result_queue);

    if receiver.join().is_err() {
        error!("Request receiver thread panicked");
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
