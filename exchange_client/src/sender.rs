//! Sending requests to the fetcher and waiting for its answer.
//!
//! Requests travel as `{"indices":[...]}` payloads on the request queue; the fetcher answers
//! on the result queue. Results carry no correlation id, so the client takes the next result
//! that shows up.
use exchange_common::FetcherError;
use exchange_common::SymbolList;
use exchange_common::channel::OutboundSink;
use exchange_common::encoder::encode_indices;
use exchange_common::queue::RedisQueue;
use log::{debug, info};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

/// Poll slice used while waiting for a result, so Ctrl+C is noticed promptly.
const POLL_INTERVAL_MS: u64 = 1000;

/// Helper type for talking to the fetcher over the queues.
pub struct RequestSender;

impl RequestSender {
    /// Publishes `symbols` as a request on `request_queue`.
    pub fn send_request(
        queue: &mut RedisQueue,
        request_queue: &str,
        symbols: &SymbolList,
    ) -> Result<(), FetcherError> {
        let payload = encode_indices(symbols)?;
        info!("Sending request for {} to '{}'", symbols, request_queue);
        queue.publish(request_queue, &payload)
    }

    /// Waits up to `wait` for the next result on the queue `queue` is bound to.
    ///
    /// Returns `Ok(None)` when the wait expires or `shutdown` is raised.
    pub fn wait_for_result(
        queue: &mut RedisQueue,
        wait: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Option<Vec<u8>>, FetcherError> {
        let deadline = Instant::now() + wait;
        let interval = Duration::from_millis(POLL_INTERVAL_MS);

        while !shutdown.load(Ordering::Relaxed) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            if let Some(payload) = queue.pop(remaining.min(interval))? {
                return Ok(Some(payload));
            }
            debug!("Still waiting on '{}'", queue.queue());
        }
        Ok(None)
    }
}
