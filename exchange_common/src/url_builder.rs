//! Provider query URL rendering.
//!
//! The provider is addressed through a fixed URL template with a single `INDEXES`
//! placeholder. The builder substitutes the comma-joined, URL-escaped symbol list there and
//! leaves every other byte of the template untouched.
use url::form_urlencoded::byte_serialize;

use crate::error::FetcherError;
use crate::indices::SymbolList;

/// Placeholder token replaced by the symbol list.
pub const PLACEHOLDER: &str = "INDEXES";

/// Yahoo YQL quote query used unless configured otherwise.
pub const DEFAULT_TEMPLATE: &str = "https://query.yahooapis.com/v1/public/yql?q=select%20*%20from%20yahoo.finance.quotes%20where%20symbol%20in%20(%22INDEXES%22)&format=json&env=store%3A%2F%2Fdatatables.org%2Falltableswithkeys";

/// Renders provider URLs from a validated template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    template: String,
}

impl UrlBuilder {
    /// Creates a builder, checking that `template` holds the placeholder exactly once.
    pub fn new(template: &str) -> Result<Self, FetcherError> {
        match template.matches(PLACEHOLDER).count() {
            1 => Ok(Self {
                template: template.to_string(),
            }),
            n => Err(FetcherError::InvalidTemplate(format!(
                "expected one {} placeholder, found {}",
                PLACEHOLDER, n
            ))),
        }
    }

    /// Renders the URL for `symbols`. An empty list is rejected.
    pub fn build(&self, symbols: &SymbolList) -> Result<String, FetcherError> {
        if symbols.is_empty() {
            return Err(FetcherError::EmptySymbolList);
        }

        let joined = symbols
            .iter()
            .map(|symbol| byte_serialize(symbol.as_bytes()).collect::<String>())
            .collect::<Vec<_>>()
            .join(",");

        Ok(self.template.replacen(PLACEHOLDER, &joined, 1))
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
