//! Yahoo Finance chart API client

use crate::config::YAHOO_API_BASE;
use crate::error::{Result, StockError};
use crate::quote::{ProviderQuote, QuoteProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const USER_AGENT: &str = concat!("tickerwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Subset of the chart `meta` object carrying the current quote
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_volume: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
}

impl From<ChartMeta> for ProviderQuote {
    fn from(meta: ChartMeta) -> Self {
        let previous_close = meta.previous_close.or(meta.chart_previous_close);
        let change_percent = match (meta.regular_market_price, previous_close) {
            (Some(price), Some(prev)) if prev != 0.0 => Some((price - prev) / prev * 100.0),
            _ => None,
        };

        ProviderQuote {
            symbol: meta.symbol,
            long_name: meta.long_name,
            short_name: meta.short_name,
            price: meta.regular_market_price,
            change_percent,
            volume: meta.regular_market_volume,
            day_high: meta.regular_market_day_high,
            day_low: meta.regular_market_day_low,
            previous_close,
            year_high: meta.fifty_two_week_high,
            year_low: meta.fifty_two_week_low,
        }
    }
}

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client against the public endpoint
    pub fn new() -> Self {
        Self::with_base_url(YAHOO_API_BASE)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn chart_url(&self, symbol: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StockError::ConfigError(format!("Invalid Yahoo base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StockError::ConfigError("Yahoo base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1d");
        Ok(url)
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_quote(&self, symbol: &str) -> Result<ProviderQuote> {
        let url = self.chart_url(symbol)?;
        tracing::debug!("Requesting Yahoo chart: {}", url);

        let http_error = |message: String| StockError::UpstreamHttp {
            symbol: symbol.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| http_error(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| http_error(e.to_string()))?;

        if !status.is_success() {
            let description = serde_json::from_str::<ChartEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.chart.error)
                .and_then(|error| error.description.or(error.code));
            let message = match description {
                Some(description) => format!("HTTP {status}: {description}"),
                None => format!("HTTP {status}"),
            };
            return Err(http_error(message));
        }

        let envelope: ChartEnvelope =
            serde_json::from_str(&body).map_err(|e| StockError::UpstreamValidation {
                detail: format!("unparseable chart response: {e}"),
            })?;

        let meta = envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.meta)
            .ok_or_else(|| StockError::UpstreamValidation {
                detail: format!("chart response for {symbol} carried no result"),
            })?;

        Ok(meta.into())
    }
}
