//! Reshapes raw provider responses into a [`QuoteResultSet`].
//!
//! The provider answers under `query.results.quote` with a single object when one symbol
//! matched and with an array when several did. Both shapes are folded into one
//! [`QuotePayload`] right at the tree boundary so records are built by a single code path.
//!
//! Required string fields are strict: a record missing any of them fails the whole batch and
//! no partial result set is ever returned. Numeric extras are lenient and fall back to zero.
use serde_json::{Map, Value};

use crate::error::FetcherError;
use crate::fetcher::RawQuoteResponse;
use crate::quote::{QuoteRecord, QuoteResultSet};

type JsonObject = Map<String, Value>;

/// The two shapes the provider uses for `results.quote`.
enum QuotePayload<'a> {
    Single(&'a JsonObject),
    Many(&'a [Value]),
}

impl<'a> QuotePayload<'a> {
    fn from_value(value: Option<&'a Value>) -> Result<Self, FetcherError> {
        match value {
            Some(Value::Object(record)) => Ok(QuotePayload::Single(record)),
            Some(Value::Array(records)) => Ok(QuotePayload::Many(records)),
            _ => Err(FetcherError::MalformedResponse),
        }
    }

    fn records(&self) -> Result<Vec<&'a JsonObject>, FetcherError> {
        match *self {
            QuotePayload::Single(record) => Ok(vec![record]),
            QuotePayload::Many(records) => records
                .iter()
                .map(|item| item.as_object().ok_or(FetcherError::MalformedResponse))
                .collect(),
        }
    }
}

/// Parses `raw` into a result set keyed by display name.
///
/// Records sharing a name overwrite each other in document order.
pub fn normalize(raw: &RawQuoteResponse) -> Result<QuoteResultSet, FetcherError> {
    let document: Value =
        serde_json::from_str(&raw.body).map_err(|_| FetcherError::MalformedResponse)?;

    let results = document
        .get("query")
        .and_then(Value::as_object)
        .and_then(|query| query.get("results"))
        .and_then(Value::as_object)
        .ok_or(FetcherError::MalformedResponse)?;

    let payload = QuotePayload::from_value(results.get("quote"))?;

    let mut set = QuoteResultSet::new();
    for record in payload.records()? {
        set.insert(build_record(record)?);
    }
    Ok(set)
}

fn build_record(fields: &JsonObject) -> Result<QuoteRecord, FetcherError> {
    Ok(QuoteRecord {
        name: required(fields, "Name")?,
        symbol: required(fields, "Symbol")?,
        percent_change: required(fields, "PercentChange")
            .or_else(|_| required(fields, "ChangeInPercent"))?,
        change_in_points: required(fields, "Change")?,
        last_trade_date: required(fields, "LastTradeDate")?,
        last_trade_time: required(fields, "LastTradeTime")?,
        price: lenient_number(fields, "LastTradePriceOnly"),
        open_price: lenient_number(fields, "Open"),
        previous_close: lenient_number(fields, "PreviousClose"),
    })
}

fn required(fields: &JsonObject, key: &str) -> Result<String, FetcherError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or(FetcherError::MalformedResponse)
}

/// `None` when the key is absent, zero when present but not numeric.
fn lenient_number(fields: &JsonObject, key: &str) -> Option<f64> {
    let value = fields.get(key)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    };
    Some(number.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE: &str = r#"{"Name":"Apple Inc.","Symbol":"AAPL","PercentChange":"1.0%","Change":"1.0","LastTradeDate":"1/1/2020","LastTradeTime":"9:00am"}"#;
    const NIKKEI: &str = r#"{"Name":"Nikkei 225","Symbol":"^N225","ChangeInPercent":"-0.91%","Change":"-172.98","LastTradeDate":"6/2/2017","LastTradeTime":"3:15pm","Open":"19,000","PreviousClose":"19860.03","LastTradePriceOnly":"-"}"#;

    fn raw(body: &str) -> RawQuoteResponse {
        RawQuoteResponse::new(body, "http://provider/test")
    }

    fn wrap(quote: &str) -> String {
        format!(r#"{{"query":{{"count":1,"results":{{"quote":{}}}}}}}"#, quote)
    }

    #[test]
    fn single_object_yields_one_record() {
        let set = normalize(&raw(&wrap(APPLE))).unwrap();

        assert_eq!(set.len(), 1);
        let record = set.get("Apple Inc.").unwrap();
        assert_eq!(record.symbol, "AAPL");
        assert_eq!(record.percent_change, "1.0%");
        assert_eq!(record.change_in_points, "1.0");
        assert_eq!(record.last_trade_date, "1/1/2020");
        assert_eq!(record.last_trade_time, "9:00am");
        assert_eq!(record.price, None);
    }

    #[test]
    fn single_object_and_one_element_array_are_equivalent() {
        let single = normalize(&raw(&wrap(APPLE))).unwrap();
        let array = normalize(&raw(&wrap(&format!("[{}]", APPLE)))).unwrap();
        assert_eq!(single, array);
    }

    #[test]
    fn array_yields_record_per_element() {
        let set = normalize(&raw(&wrap(&format!("[{},{}]", APPLE, NIKKEI)))).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["Apple Inc.", "Nikkei 225"]);
    }

    #[test]
    fn change_in_percent_is_accepted() {
        let set = normalize(&raw(&wrap(NIKKEI))).unwrap();
        assert_eq!(set.get("Nikkei 225").unwrap().percent_change, "-0.91%");
    }

    #[test]
    fn non_numeric_extras_resolve_to_zero() {
        let set = normalize(&raw(&wrap(NIKKEI))).unwrap();
        let record = set.get("Nikkei 225").unwrap();

        assert_eq!(record.price, Some(0.0));
        assert_eq!(record.open_price, Some(0.0));
        assert_eq!(record.previous_close, Some(19860.03));
    }

    #[test]
    fn numeric_extras_accept_json_numbers() {
        let quote = APPLE.replace('}', r#","Open":301.5}"#);
        let set = normalize(&raw(&wrap(&quote))).unwrap();
        assert_eq!(set.get("Apple Inc.").unwrap().open_price, Some(301.5));
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let later = APPLE.replace("\"AAPL\"", "\"AAPL.MX\"");
        let set = normalize(&raw(&wrap(&format!("[{},{}]", APPLE, later)))).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Apple Inc.").unwrap().symbol, "AAPL.MX");
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let cases = [
            "".to_string(),
            "not json".to_string(),
            "{}".to_string(),
            "[]".to_string(),
            r#"{"query":null}"#.to_string(),
            r#"{"query":{"results":null}}"#.to_string(),
            r#"{"query":{"results":{}}}"#.to_string(),
            wrap("null"),
            wrap("\"AAPL\""),
            wrap("[1]"),
        ];

        for body in cases {
            assert!(
                matches!(normalize(&raw(&body)), Err(FetcherError::MalformedResponse)),
                "body should be rejected: {}",
                body
            );
        }
    }

    #[test]
    fn null_name_is_rejected() {
        let quote = APPLE.replace("\"Apple Inc.\"", "null");
        assert!(matches!(
            normalize(&raw(&wrap(&quote))),
            Err(FetcherError::MalformedResponse)
        ));
    }

    #[test]
    fn one_bad_record_fails_the_batch() {
        let broken = NIKKEI.replace(r#""Change":"-172.98","#, "");
        let result = normalize(&raw(&wrap(&format!("[{},{}]", APPLE, broken))));
        assert!(matches!(result, Err(FetcherError::MalformedResponse)));
    }

    #[test]
    fn empty_array_yields_empty_set() {
        let set = normalize(&raw(&wrap("[]"))).unwrap();
        assert!(set.is_empty());
    }
}
