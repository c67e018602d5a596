//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `FetcherError`, so functions can simply return `Result<T>`.
use crate::error::FetcherError;

/// Workspace-wide `Result` alias with `FetcherError` as the default error.
pub type Result<T, E = FetcherError> = std::result::Result<T, E>;
