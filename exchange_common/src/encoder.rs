//! Wire encoding of result sets and request payloads.
//!
//! Output is compact JSON. Result sets list their records in ascending name order and each
//! record keeps the field order declared on [`QuoteRecord`](crate::quote::QuoteRecord).
use serde::Serialize;

use crate::error::FetcherError;
use crate::indices::SymbolList;
use crate::quote::QuoteResultSet;

#[derive(Serialize)]
struct IndicesRequest<'a> {
    indices: &'a SymbolList,
}

/// Encodes a result set for publishing or printing.
pub fn encode_results(results: &QuoteResultSet) -> Result<Vec<u8>, FetcherError> {
    Ok(serde_json::to_vec(results)?)
}

/// Encodes `symbols` as a `{"indices":[...]}` request payload.
pub fn encode_indices(symbols: &SymbolList) -> Result<Vec<u8>, FetcherError> {
    Ok(serde_json::to_vec(&IndicesRequest { indices: symbols })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indices::split;
    use crate::quote::sample_record;

    #[test]
    fn encode_results_orders_keys_and_fields() {
        let mut results = QuoteResultSet::new();
        results.insert(sample_record("Foo", "F"));
        results.insert(sample_record("Bar", "B"));

        let expected = concat!(
            r#"{"Bar":{"Name":"Bar","Symbol":"B","PercentChange":"2%","ChangeInPoints":"2.0","LastTradeDate":"12/01/2017","LastTradeTime":"12:31pm"},"#,
            r#""Foo":{"Name":"Foo","Symbol":"F","PercentChange":"2%","ChangeInPoints":"2.0","LastTradeDate":"12/01/2017","LastTradeTime":"12:31pm"}}"#
        );

        let encoded = encode_results(&results).unwrap();
        assert_eq!(String::from_utf8(encoded).unwrap(), expected);
    }

    #[test]
    fn encode_results_appends_numeric_fields_when_present() {
        let mut record = sample_record("Foo", "F");
        record.price = Some(10.5);
        record.previous_close = Some(0.0);
        let results: QuoteResultSet = [record].into_iter().collect();

        let encoded = String::from_utf8(encode_results(&results).unwrap()).unwrap();
        assert!(encoded.ends_with(r#""LastTradeTime":"12:31pm","Price":10.5,"PreviousClose":0.0}}"#));
    }

    #[test]
    fn encode_empty_results() {
        let encoded = encode_results(&QuoteResultSet::new()).unwrap();
        assert_eq!(encoded, b"{}");
    }

    #[test]
    fn encode_indices_renders_request_payload() {
        let symbols = SymbolList::new(["AAPL", "^N225"]);
        let encoded = encode_indices(&symbols).unwrap();
        assert_eq!(encoded, br#"{"indices":["AAPL","^N225"]}"#);
    }

    #[test]
    fn split_inverts_encode_indices() {
        let lists = [
            SymbolList::new(["AAPL"]),
            SymbolList::new(["GOOGL", "AAPL", "GOOGL"]),
            SymbolList::new(["with space", "semi;colon", "comma,sep"]),
            SymbolList::default(),
        ];

        for list in lists {
            assert_eq!(split(&encode_indices(&list).unwrap()), list);
        }
    }
}
