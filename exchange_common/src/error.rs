//! Error types shared between the fetcher and the client.
//!
//! The `FetcherError` enum unifies every failure a request or a process can hit: transport
//! problems talking to the quote provider or the message queue, provider payloads that do not
//! match any accepted shape, encoding failures, and setup-time configuration errors.
use std::io;

use thiserror::Error;

/// Unified error type shared by the fetcher and the client.
#[derive(Error, Debug)]
pub enum FetcherError {
    /// I/O error originating from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Network or connection failure while fetching quotes or talking to the queue.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider's JSON did not match any of the accepted shapes.
    #[error("Malformed response from quote provider")]
    MalformedResponse,

    /// Serialization failure of an otherwise valid result set.
    #[error("JSON encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A request carried no usable symbols.
    #[error("List of values should not be empty.")]
    EmptySymbolList,

    /// Provider URL template without exactly one placeholder.
    #[error("Invalid provider URL template: {0}")]
    InvalidTemplate(String),

    /// Missing or unparsable configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}

impl From<reqwest::Error> for FetcherError {
    fn from(err: reqwest::Error) -> Self {
        FetcherError::Transport(err.to_string())
    }
}

impl From<redis::RedisError> for FetcherError {
    fn from(err: redis::RedisError) -> Self {
        FetcherError::Transport(format!("queue: {}", err))
    }
}

impl<T> From<crossbeam_channel::SendError<T>> for FetcherError {
    fn from(err: crossbeam_channel::SendError<T>) -> Self {
        FetcherError::ChannelSend(err.to_string())
    }
}

impl From<crossbeam_channel::RecvError> for FetcherError {
    fn from(err: crossbeam_channel::RecvError) -> Self {
        FetcherError::ChannelRecv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_symbol_list_message() {
        let err = FetcherError::EmptySymbolList;
        assert_eq!(err.to_string(), "List of values should not be empty.");
    }

    #[test]
    fn channel_errors_keep_context() {
        let (tx, rx) = crossbeam_channel::unbounded::<u8>();
        drop(rx);
        let err: FetcherError = tx.send(1).unwrap_err().into();
        assert!(matches!(err, FetcherError::ChannelSend(_)));
    }
}
