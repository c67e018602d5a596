//! Symbol lists and the helpers that split request payloads into them.
//!
//! A request payload is either a JSON object carrying an `indices` array of strings, or a
//! freeform string of symbols separated by commas, semicolons or whitespace. Splitting never
//! fails: anything unusable is skipped and the worst case is an empty list, which the
//! orchestrator then rejects at the request level.
use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::FetcherError;

/// Key holding the symbol array in JSON request payloads.
pub const INDICES_KEY: &str = "indices";

/// Ordered list of non-empty symbol strings for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolList(Vec<String>);

impl SymbolList {
    /// Builds a list from already split symbols, dropping blank entries.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SymbolList(
            symbols
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.trim().is_empty())
                .collect(),
        )
    }

    /// Returns `true` when no symbols are left.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Symbols in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Joins the symbols with `sep`, in order.
    pub fn join(&self, sep: &str) -> String {
        self.0.join(sep)
    }
}

impl fmt::Display for SymbolList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

/// Parses a freeform list; used for CLI values, where an empty list is an error.
impl FromStr for SymbolList {
    type Err = FetcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let list = split_list_body(s);
        if list.is_empty() {
            return Err(FetcherError::EmptySymbolList);
        }
        Ok(list)
    }
}

/// Splits an inbound payload of either accepted shape.
///
/// Any payload that parses as JSON is a JSON request, whatever its top-level value. Text that
/// looks like a JSON object but does not parse yields an empty list; everything else goes
/// through the freeform splitter.
pub fn split(body: &[u8]) -> SymbolList {
    if let Ok(document) = serde_json::from_slice::<Value>(body) {
        return indices_of(&document);
    }

    let text = String::from_utf8_lossy(body);
    if text.trim_start().starts_with('{') {
        SymbolList::default()
    } else {
        split_list_body(&text)
    }
}

/// Extracts the `indices` array from a parsed JSON request.
///
/// A non-object document or a missing or non-array `indices` key yield an empty list.
/// Non-string elements are skipped; order and repeats are kept as sent.
fn indices_of(document: &Value) -> SymbolList {
    match document
        .as_object()
        .and_then(|request| request.get(INDICES_KEY))
        .and_then(Value::as_array)
    {
        Some(items) => SymbolList::new(items.iter().filter_map(Value::as_str)),
        None => SymbolList::default(),
    }
}

/// Splits a freeform list on runs of whitespace, commas or semicolons.
///
/// Empty fragments are discarded and only the first appearance of a symbol is kept.
pub fn split_list_body(text: &str) -> SymbolList {
    let mut seen = HashSet::new();
    SymbolList(
        text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|fragment| !fragment.is_empty())
            .filter(|fragment| seen.insert(*fragment))
            .map(String::from)
            .collect(),
    )
}

/// Trait providing file parsing for symbol lists.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Every line goes through the freeform splitter, so a file may hold one symbol per line
    /// or several per line. Repeats across lines are dropped.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<SymbolList, FetcherError>;
}

impl SymbolParser for SymbolList {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<SymbolList, FetcherError> {
        let mut body = String::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(FetcherError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }
            body.push_str(trimmed_line);
            body.push('\n');
        }
        Ok(split_list_body(&body))
    }
}
