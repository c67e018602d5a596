//! Normalized quote records and the per-request result set.
//!
//! A `QuoteRecord` is the fixed-shape entry published to consumers. Field names on the wire
//! follow the provider's capitalised style (`Name`, `Symbol`, ...). The optional numeric
//! fields are only written when the provider sent them.
use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

/// Normalized quote for a single index or ticker.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuoteRecord {
    /// Display name; also the key of the record in its result set.
    pub name: String,
    /// Provider symbol, e.g. `^N225`.
    pub symbol: String,
    /// Provider formatting is kept as-is, e.g. `"-0.91%"`.
    pub percent_change: String,
    /// Absolute change, taken from the provider's `Change`.
    pub change_in_points: String,
    /// Provider trade date, unparsed.
    pub last_trade_date: String,
    /// Provider trade time, unparsed.
    pub last_trade_time: String,
    /// Last trade price (`LastTradePriceOnly`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Session open (`Open`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_price: Option<f64>,
    /// Previous session close (`PreviousClose`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
}

/// Mapping from display name to record for one request.
///
/// Keys are unique and each record's `name` equals its key. Iteration and serialization
/// follow ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuoteResultSet(BTreeMap<String, QuoteRecord>);

#[allow(missing_docs)]
impl QuoteResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under its own name, replacing any earlier record with that name.
    pub fn insert(&mut self, record: QuoteRecord) -> Option<QuoteRecord> {
        self.0.insert(record.name.clone(), record)
    }

    pub fn get(&self, name: &str) -> Option<&QuoteRecord> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<QuoteRecord> for QuoteResultSet {
    fn from_iter<I: IntoIterator<Item = QuoteRecord>>(iter: I) -> Self {
        let mut set = QuoteResultSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a> IntoIterator for &'a QuoteResultSet {
    type Item = (&'a String, &'a QuoteRecord);
    type IntoIter = btree_map::Iter<'a, String, QuoteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_record(name: &str, symbol: &str) -> QuoteRecord {
    QuoteRecord {
        name: name.to_string(),
        symbol: symbol.to_string(),
        percent_change: "2%".to_string(),
        change_in_points: "2.0".to_string(),
        last_trade_date: "12/01/2017".to_string(),
        last_trade_time: "12:31pm".to_string(),
        price: None,
        open_price: None,
        previous_close: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keys_by_name_and_last_write_wins() {
        let mut set = QuoteResultSet::new();
        set.insert(sample_record("Foo", "F1"));
        let replaced = set.insert(sample_record("Foo", "F2"));

        assert_eq!(replaced.map(|r| r.symbol), Some("F1".to_string()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Foo").unwrap().symbol, "F2");
    }

    #[test]
    fn every_key_matches_record_name() {
        let set: QuoteResultSet = [sample_record("Foo", "F"), sample_record("Bar", "B")]
            .into_iter()
            .collect();

        for (key, record) in &set {
            assert_eq!(key, &record.name);
        }
        assert_eq!(set.names().collect::<Vec<_>>(), ["Bar", "Foo"]);
    }
}
