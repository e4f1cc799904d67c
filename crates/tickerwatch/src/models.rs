//! Data records exchanged between providers, the HTTP boundary and the client

use serde::{Deserialize, Serialize};

/// Current quote for one ticker symbol
///
/// Numeric fields are optional; the provider may omit any of them and absence
/// is carried through rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Uppercase ticker, the identity key within a watchlist
    pub symbol: String,

    /// Display name (long name, short name, or the symbol)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Percent change against the previous close
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_high: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_low: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_high: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_low: Option<f64>,
}

impl Quote {
    /// Quote carrying only identity fields
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price: None,
            change: None,
            volume: None,
            day_high: None,
            day_low: None,
            previous_close: None,
            year_high: None,
            year_low: None,
        }
    }
}

/// One recent news result for a symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub snippet: String,
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NewsItem {
    /// Copy of this item without its link, as returned by plain news lookups
    pub fn without_link(&self) -> Self {
        Self {
            link: None,
            ..self.clone()
        }
    }
}

/// Plain news lookup response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub news: Vec<NewsItem>,
}

/// Summarized answer and the ordered sources it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsAnalysis {
    pub analysis: String,
    pub sources: Vec<NewsItem>,
}
