//! Redis-backed request and result queues.
//!
//! Each queue is a Redis list: publishers `RPUSH` payloads onto the tail and the consumer
//! `BLPOP`s from the head, so payloads are delivered in arrival order. A broken connection is
//! dropped and reopened on the next call; the caller decides whether to keep going.
use std::time::Duration;

use log::{debug, warn};
use redis::{Client, Commands, Connection};

use crate::channel::{InboundSource, OutboundSink};
use crate::error::FetcherError;

/// Synchronous wrapper around one Redis client.
pub struct RedisQueue {
    /// The internal Redis client instance.
    client: Client,
    connection: Option<Connection>,
    /// List consumed by [`InboundSource::receive`].
    queue: String,
}

impl RedisQueue {
    /// Opens a client for `url`, checks the server answers and binds the consumer side to
    /// `queue`.
    pub fn connect(url: &str, queue: &str) -> Result<Self, FetcherError> {
        let client = Client::open(url)?;
        let mut connection = client.get_connection()?;
        let _: String = redis::cmd("PING").query(&mut connection)?;
        debug!("Queue connection ready for '{}'", queue);

        Ok(Self {
            client,
            connection: Some(connection),
            queue: queue.to_string(),
        })
    }

    /// Name of the consumed list.
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Pops the next payload, waiting at most `timeout` (zero waits forever).
    ///
    /// Returns `Ok(None)` when the wait expired without a payload.
    pub fn pop(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, FetcherError> {
        let queue = self.queue.clone();
        let popped: Option<(String, Vec<u8>)> =
            self.with_connection(|conn| conn.blpop(&queue, timeout.as_secs_f64()))?;
        Ok(popped.map(|(_, payload)| payload))
    }

    fn with_connection<T, F>(&mut self, op: F) -> Result<T, FetcherError>
    where
        F: FnOnce(&mut Connection) -> redis::RedisResult<T>,
    {
        let mut connection = match self.connection.take() {
            Some(connection) => connection,
            None => {
                debug!("Reopening queue connection");
                self.client.get_connection()?
            }
        };

        match op(&mut connection) {
            Ok(value) => {
                self.connection = Some(connection);
                Ok(value)
            }
            Err(e) => {
                warn!("Queue connection dropped after error: {}", e);
                Err(e.into())
            }
        }
    }
}

impl InboundSource for RedisQueue {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, FetcherError> {
        loop {
            if let Some(payload) = self.pop(Duration::ZERO)? {
                return Ok(Some(payload));
            }
        }
    }
}

impl OutboundSink for RedisQueue {
    fn publish(&mut self, destination: &str, payload: &[u8]) -> Result<(), FetcherError> {
        let _: () = self.with_connection(|conn| conn.rpush(destination, payload))?;
        Ok(())
    }
}
