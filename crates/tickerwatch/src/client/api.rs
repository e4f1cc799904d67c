//! Client side of the HTTP boundary

use crate::error::{Result, StockError};
use crate::models::{NewsAnalysis, NewsItem, NewsResponse, Quote};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The three lookups the watchlist client needs
#[async_trait]
pub trait StockApi: Send + Sync {
    /// Current quote for an uppercase symbol
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Recent news without links
    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>>;

    /// Summarized recent news with linked sources
    async fn analyze_news(&self, symbol: &str) -> Result<NewsAnalysis>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`StockApi`] over HTTP against a running server
#[derive(Debug, Clone)]
pub struct HttpStockApi {
    client: Client,
    base_url: String,
}

impl HttpStockApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(StockError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl StockApi for HttpStockApi {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        self.get_json("/api/stocks", &[("symbol", symbol)]).await
    }

    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        let response: NewsResponse = self
            .get_json("/api/stocks/news", &[("symbol", symbol)])
            .await?;
        Ok(response.news)
    }

    async fn analyze_news(&self, symbol: &str) -> Result<NewsAnalysis> {
        self.get_json("/api/stocks/news", &[("symbol", symbol), ("analyze", "true")])
            .await
    }
}
