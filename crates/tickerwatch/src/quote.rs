//! Quote fetcher: provider-agnostic current quote lookup

use crate::error::{Result, StockError};
use crate::models::Quote;
use async_trait::async_trait;
use std::sync::Arc;

/// Raw quote fields as reported by a quote provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderQuote {
    pub symbol: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub price: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub previous_close: Option<f64>,
    pub year_high: Option<f64>,
    pub year_low: Option<f64>,
}

/// Source of current quote data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote for an uppercase symbol
    async fn fetch_quote(&self, symbol: &str) -> Result<ProviderQuote>;
}

/// Normalizes provider quotes into [`Quote`] records
#[derive(Clone)]
pub struct QuoteFetcher {
    provider: Arc<dyn QuoteProvider>,
}

impl QuoteFetcher {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    /// Look up the current quote for `symbol`
    ///
    /// The symbol is passed through as given; callers uppercase it. An empty
    /// symbol is rejected before any provider call.
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        if symbol.trim().is_empty() {
            return Err(StockError::MissingSymbol);
        }

        let raw = self.provider.fetch_quote(symbol).await?;
        Ok(normalize(symbol, raw))
    }
}

fn normalize(requested: &str, raw: ProviderQuote) -> Quote {
    let symbol = raw
        .symbol
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| requested.to_string());

    let name = [raw.long_name, raw.short_name]
        .into_iter()
        .flatten()
        .find(|n| !n.trim().is_empty())
        .unwrap_or_else(|| symbol.clone());

    Quote {
        symbol,
        name,
        price: raw.price,
        change: raw.change_percent,
        volume: raw.volume,
        day_high: raw.day_high,
        day_low: raw.day_low,
        previous_close: raw.previous_close,
        year_high: raw.year_high,
        year_low: raw.year_low,
    }
}
