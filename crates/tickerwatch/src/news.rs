//! News fetcher: recent short-horizon news for a symbol

use crate::error::{Result, StockError};
use crate::models::NewsItem;
use async_trait::async_trait;
use std::sync::Arc;

/// One web search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    /// Maximum number of results
    pub num: usize,
    /// Recency window, e.g. `qdr:d` for the last day
    pub recency: String,
}

/// One organic search result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub source: String,
    pub link: String,
}

/// Web search backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query, returning results in provider order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>>;
}

/// Builds news queries and maps search results onto [`NewsItem`]s
#[derive(Clone)]
pub struct NewsFetcher {
    provider: Arc<dyn SearchProvider>,
    count: usize,
    recency: String,
}

impl NewsFetcher {
    /// Fetcher returning at most five results from the last day
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            count: 5,
            recency: "qdr:d".to_string(),
        }
    }

    /// Override the result cap and recency window
    pub fn with_window(mut self, count: usize, recency: impl Into<String>) -> Self {
        self.count = count;
        self.recency = recency.into();
        self
    }

    /// Recent news for `symbol`, order preserved, links included
    pub async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        if symbol.trim().is_empty() {
            return Err(StockError::MissingSymbol);
        }

        let query = SearchQuery {
            query: format!("{symbol} stock news"),
            num: self.count,
            recency: self.recency.clone(),
        };

        let results = self.provider.search(&query).await?;
        tracing::debug!("Search for {} returned {} results", symbol, results.len());

        Ok(results
            .into_iter()
            .take(self.count)
            .map(|result| NewsItem {
                title: result.title,
                snippet: result.snippet,
                source: result.source,
                link: Some(result.link),
            })
            .collect())
    }
}
