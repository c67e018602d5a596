//! Request orchestration: payload in, encoded result set out.
//!
//! For every request the orchestrator runs split -> build URL -> fetch -> normalize ->
//! encode, and in streaming mode publishes the encoded payload. Each stage reports failure
//! through [`RequestFailure`], tagged with the stage it happened in, and a failed request
//! never stops the loop.
//!
//! Streaming uses two threads: a receiver pulling payloads off the inbound source and the
//! caller's thread running the pipeline. They are joined by a zero-capacity channel, so
//! the receiver only takes the next payload once the previous one has been handled.
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, bounded};
use log::{debug, error, info, warn};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::channel::{InboundSource, OutboundSink};
use crate::encoder::encode_results;
use crate::error::FetcherError;
use crate::fetcher::QuoteFetcher;
use crate::indices::{SymbolList, split};
use crate::normalizer::normalize;
use crate::quote::QuoteResultSet;
use crate::url_builder::UrlBuilder;

/// Pause before asking a failing inbound source again.
pub const RECEIVE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Pipeline stage a request failed in.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Split,
    Fetch,
    Parse,
    Encode,
    Publish,
}

/// A request abandoned at `stage`.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {error}")]
pub struct RequestFailure {
    /// Stage the request stopped in.
    pub stage: Stage,
    /// Underlying cause.
    #[source]
    pub error: FetcherError,
    /// URL of the provider response the request failed on, once one was fetched.
    pub response_url: Option<String>,
}

impl RequestFailure {
    fn at(stage: Stage) -> impl FnOnce(FetcherError) -> Self {
        move |error| RequestFailure {
            stage,
            error,
            response_url: None,
        }
    }
}

/// Result set ready for encoding, or the failure that ended the request.
pub type RequestOutcome = Result<QuoteResultSet, RequestFailure>;

/// Counters for one streaming session.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub received: usize,
    pub published: usize,
    pub failed: usize,
}

/// Drives requests through the pipeline using `fetcher` for provider calls.
pub struct Orchestrator<F> {
    urls: UrlBuilder,
    fetcher: F,
}

impl<F: QuoteFetcher> Orchestrator<F> {
    /// Creates an orchestrator rendering URLs with `urls`.
    pub fn new(urls: UrlBuilder, fetcher: F) -> Self {
        Self { urls, fetcher }
    }

    /// Builds the URL for `symbols`, fetches it and normalizes the response.
    pub fn resolve(&self, symbols: &SymbolList) -> RequestOutcome {
        let url = self.urls.build(symbols).map_err(RequestFailure::at(Stage::Split))?;
        debug!("Provider URL: {}", url);

        let raw = self.fetcher.fetch(&url).map_err(RequestFailure::at(Stage::Fetch))?;
        info!("Fetched results from quote provider.");

        debug!("Response from {} fetched at {}", raw.source, raw.fetched_at);

        let results = normalize(&raw).map_err(|error| {
            error!("Cannot parse response from {}: {}", raw.source, raw.body);
            RequestFailure {
                stage: Stage::Parse,
                error,
                response_url: Some(raw.source.clone()),
            }
        })?;
        info!("Parsed {} quote(s) from provider response.", results.len());
        Ok(results)
    }

    /// Runs the whole pipeline for one inbound payload and returns the encoded result set.
    ///
    /// A payload without usable symbols fails in the split stage.
    pub fn process(&self, payload: &[u8]) -> Result<Vec<u8>, RequestFailure> {
        let symbols = split(payload);
        if symbols.is_empty() {
            return Err(RequestFailure::at(Stage::Split)(FetcherError::EmptySymbolList));
        }
        info!("Indices received are: {}", symbols);

        let results = self.resolve(&symbols)?;
        encode_results(&results).map_err(RequestFailure::at(Stage::Encode))
    }

    /// Streaming loop: handles every payload from `requests` in order and publishes each
    /// encoded result to `destination`.
    ///
    /// Failures are logged and counted; the loop only returns once `requests` is closed.
    pub fn serve<K: OutboundSink>(
        &self,
        requests: Receiver<Vec<u8>>,
        sink: &mut K,
        destination: &str,
    ) -> StreamStats {
        let mut stats = StreamStats::default();

        for payload in requests.iter() {
            stats.received += 1;
            let published = self.process(&payload).and_then(|encoded| {
                sink.publish(destination, &encoded)
                    .map_err(RequestFailure::at(Stage::Publish))
            });

            match published {
                Ok(()) => {
                    stats.published += 1;
                    info!("Published results to subscribers on '{}'.", destination);
                }
                Err(failure) => {
                    stats.failed += 1;
                    match failure.error {
                        FetcherError::EmptySymbolList => warn!("Skipping request: {}", failure),
                        _ => error!("Request abandoned: {}", failure),
                    }
                }
            }
        }

        info!(
            "Request stream closed: {} received, {} published, {} failed",
            stats.received, stats.published, stats.failed
        );
        stats
    }
}

/// Spawns the thread that pulls payloads from `source` and hands them over one at a time.
///
/// The returned receiver closes when the source reports it is closed. Receive errors are
/// logged and retried after [`RECEIVE_RETRY_DELAY`].
pub fn spawn_receiver<S>(mut source: S) -> (Receiver<Vec<u8>>, JoinHandle<()>)
where
    S: InboundSource + Send + 'static,
{
    let (tx, rx) = bounded::<Vec<u8>>(0);

    let handle = thread::spawn(move || {
        loop {
            match source.receive() {
                Ok(Some(payload)) => {
                    debug!("Received {} byte request", payload.len());
                    if tx.send(payload).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to receive request: {}", e);
                    thread::sleep(RECEIVE_RETRY_DELAY);
                }
            }
        }
        info!("Request receiver stopping...");
    });

    (rx, handle)
}
