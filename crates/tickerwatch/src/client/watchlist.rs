//! Ordered, symbol-unique list of tracked quotes

use crate::client::settle::{MergeReport, Settled, merge_by_key};
use crate::error::StockError;
use crate::models::Quote;
use serde::{Deserialize, Serialize};

/// The user's tracked quotes in insertion order
///
/// Serialized as a plain JSON array of quotes. Deserializing keeps the first
/// occurrence of any repeated symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Quote>", into = "Vec<Quote>")]
pub struct Watchlist {
    entries: Vec<Quote>,
}

impl From<Vec<Quote>> for Watchlist {
    fn from(quotes: Vec<Quote>) -> Self {
        let mut watchlist = Watchlist::default();
        for quote in quotes {
            watchlist.add(quote);
        }
        watchlist
    }
}

impl From<Watchlist> for Vec<Quote> {
    fn from(watchlist: Watchlist) -> Self {
        watchlist.entries
    }
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.entries.iter().find(|q| q.symbol == symbol)
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.entries
    }

    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|q| q.symbol.clone()).collect()
    }

    /// Append `quote` unless its symbol is already tracked
    pub fn add(&mut self, quote: Quote) -> bool {
        if self.contains(&quote.symbol) {
            return false;
        }
        self.entries.push(quote);
        true
    }

    /// Remove `symbol`, returning whether anything was removed
    pub fn remove(&mut self, symbol: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|q| q.symbol != symbol);
        self.entries.len() != before
    }

    /// Apply refreshed quotes without reordering or re-adding removed symbols
    pub fn merge_refreshed(
        &mut self,
        settled: Vec<Settled<String, Quote, StockError>>,
    ) -> MergeReport<String, StockError> {
        merge_by_key(&mut self.entries, settled, |q| &q.symbol)
    }
}
