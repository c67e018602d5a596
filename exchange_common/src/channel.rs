//! Message channel contracts used by the streaming orchestrator.
//!
//! The orchestrator only needs two things from a message transport: a source yielding raw
//! payloads in arrival order and a sink accepting a payload for a named destination. The
//! Redis-backed queue in [`crate::queue`] implements both; the crossbeam-backed types here
//! serve in-process wiring and tests.
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::error::FetcherError;

/// Inbound side of a message channel.
pub trait InboundSource {
    /// Blocks until the next payload arrives. `Ok(None)` means the source is closed.
    fn receive(&mut self) -> Result<Option<Vec<u8>>, FetcherError>;
}

/// Outbound side of a message channel.
pub trait OutboundSink {
    /// Delivers `payload` to `destination`.
    fn publish(&mut self, destination: &str, payload: &[u8]) -> Result<(), FetcherError>;
}

/// In-process source fed by a crossbeam channel.
pub struct MemorySource {
    rx: Receiver<Vec<u8>>,
}

impl MemorySource {
    /// Creates a source together with the sender that feeds it.
    pub fn pair() -> (Sender<Vec<u8>>, Self) {
        let (tx, rx) = unbounded();
        (tx, Self { rx })
    }
}

impl InboundSource for MemorySource {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, FetcherError> {
        Ok(self.rx.recv().ok())
    }
}

/// In-process sink forwarding `(destination, payload)` pairs to a crossbeam channel.
pub struct MemorySink {
    tx: Sender<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Creates a sink together with the receiver that observes published messages.
    pub fn pair() -> (Self, Receiver<(String, Vec<u8>)>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl OutboundSink for MemorySink {
    fn publish(&mut self, destination: &str, payload: &[u8]) -> Result<(), FetcherError> {
        self.tx.send((destination.to_string(), payload.to_vec()))?;
        Ok(())
    }
}
