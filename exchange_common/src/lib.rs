//!
//! Core of the exchange fetcher: turning symbol requests into normalized quote results.
//!
//! This crate aggregates:
//! - `error` — unified error type `FetcherError` used across the workspace.
//! - `result` — handy `Result<T, FetcherError>` alias.
//! - `indices` — symbol lists and request payload splitting.
//! - `url_builder` — provider query URL rendering.
//! - `fetcher` — HTTP retrieval of raw provider responses.
//! - `quote` — normalized `QuoteRecord` and `QuoteResultSet` types.
//! - `normalizer` — tolerant provider JSON to result set mapping.
//! - `encoder` — canonical JSON encoding of results and requests.
//! - `channel` — inbound/outbound message channel contracts.
//! - `queue` — Redis list implementation of the message channel.
//! - `config` — environment-derived provider and queue configuration.
//! - `orchestrator` — per-request pipeline and the streaming loop.
#![warn(missing_docs)]
pub mod channel;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fetcher;
pub mod indices;
pub mod normalizer;
pub mod orchestrator;
pub mod queue;
pub mod quote;
pub mod result;
pub mod url_builder;

pub use error::FetcherError;
pub use indices::SymbolList;
pub use orchestrator::Orchestrator;
pub use quote::{QuoteRecord, QuoteResultSet};
pub use result::Result;
