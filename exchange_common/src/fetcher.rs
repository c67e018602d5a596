//! HTTP retrieval of raw provider responses.
//!
//! The fetcher performs exactly one GET per call and does not look at the body beyond
//! trimming it. Interpretation is left to the normalizer.
use std::time::Duration;

use chrono::Utc;
use log::debug;
use reqwest::blocking::Client;

use crate::error::FetcherError;

/// Default transport timeout for provider calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raw provider body together with where and when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuoteResponse {
    /// Trimmed response body.
    pub body: String,
    /// URL of the request that produced the body.
    pub source: String,
    /// UTC fetch time in milliseconds since the Unix epoch.
    pub fetched_at: u64,
}

impl RawQuoteResponse {
    /// Wraps `body` fetched from `source`, stamped with the current time.
    pub fn new(body: &str, source: &str) -> Self {
        RawQuoteResponse {
            body: body.trim().to_string(),
            source: source.to_string(),
            fetched_at: Utc::now().timestamp_millis() as u64,
        }
    }
}

/// Source of raw provider responses.
pub trait QuoteFetcher {
    /// Fetches the body behind `url`.
    fn fetch(&self, url: &str) -> Result<RawQuoteResponse, FetcherError>;
}

/// Blocking `reqwest` implementation of [`QuoteFetcher`].
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetcherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl QuoteFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<RawQuoteResponse, FetcherError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.text()?;
        debug!("Received {} bytes from provider: {}", body.len(), body.trim());
        Ok(RawQuoteResponse::new(&body, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_RESULT: &str = r#"{"query":{"results":{"quote":{"symbol":"^n225","Change_PercentChange":"-172.98 - -0.91%","Change":"-172.98"}}}}"#;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn fetch_returns_trimmed_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/quotes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("{}\n", JSON_RESULT))
            .create();

        let url = format!("{}/quotes", server.url());
        let result = fetcher().fetch(&url).unwrap();

        mock.assert();
        assert_eq!(result.body, JSON_RESULT);
        assert_eq!(result.source, url);
        assert!(result.fetched_at > 0);
    }

    #[test]
    fn fetch_with_request_error() {
        let result = fetcher().fetch("foo.bar");
        assert!(matches!(result, Err(FetcherError::Transport(_))));
    }

    #[test]
    fn fetch_with_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = fetcher().fetch(&format!("http://127.0.0.1:{}/quotes", port));
        assert!(matches!(result, Err(FetcherError::Transport(_))));
    }

    #[test]
    fn fetch_gives_up_on_silent_provider() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let fetcher = HttpFetcher::new(Duration::from_millis(200)).unwrap();
        let result = fetcher.fetch(&format!("http://127.0.0.1:{}/quotes", port));

        assert!(matches!(result, Err(FetcherError::Transport(_))));
        drop(listener);
    }

    #[test]
    fn fetch_with_error_status() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/quotes").with_status(503).create();

        let result = fetcher().fetch(&format!("{}/quotes", server.url()));
        assert!(matches!(result, Err(FetcherError::Transport(_))));
    }

    #[test]
    fn fetch_does_not_interpret_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/quotes")
            .with_status(200)
            .with_body("  not json at all  ")
            .create();

        let result = fetcher().fetch(&format!("{}/quotes", server.url())).unwrap();
        assert_eq!(result.body, "not json at all");
    }
}
