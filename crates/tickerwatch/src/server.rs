//! HTTP boundary: quote and news lookup endpoints
//!
//! Every handler converts its failures into a `{"error": ...}` body with the
//! status of the error's kind, so nothing leaves the boundary unconverted.

use crate::api::{SerperClient, YahooFinanceClient};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::models::{NewsAnalysis, NewsResponse, Quote};
use crate::news::NewsFetcher;
use crate::quote::QuoteFetcher;
use crate::summarizer::NewsSummarizer;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tickerwatch_llm::providers::{OpenAIConfig, OpenAIProvider};
use tower_http::trace::TraceLayer;

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    quotes: QuoteFetcher,
    news: NewsFetcher,
    summarizer: NewsSummarizer,
}

impl AppState {
    pub fn new(quotes: QuoteFetcher, news: NewsFetcher, summarizer: NewsSummarizer) -> Self {
        Self {
            quotes,
            news,
            summarizer,
        }
    }

    /// Wire the Yahoo, Serper and Groq clients from configuration
    pub fn from_config(config: &StockConfig) -> Result<Self> {
        config.validate()?;

        let quotes = QuoteFetcher::new(Arc::new(YahooFinanceClient::with_base_url(
            &config.yahoo_api_base,
        )));

        let search = SerperClient::with_base_url(&config.serper_api_key, &config.serper_api_base);
        let news = NewsFetcher::new(Arc::new(search))
            .with_window(config.news_count, &config.news_recency);

        let llm_config = OpenAIConfig::groq(&config.groq_api_key)
            .with_api_base(&config.groq_api_base)
            .with_timeout(config.llm_timeout.as_secs());
        let llm = OpenAIProvider::with_config(llm_config)?;

        let summarizer = NewsSummarizer::new(news.clone(), Arc::new(llm), config);

        Ok(Self::new(quotes, news, summarizer))
    }
}

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/stocks", get(get_stock))
        .route("/api/stocks/news", get(get_stock_news))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Raw query pairs in request order
type QueryPairs = std::result::Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Query parameters shared by both lookup endpoints
#[derive(Debug, Default)]
pub struct StockParams {
    pub symbol: Option<String>,
    pub analyze: Option<String>,
}

impl StockParams {
    /// Keep the first value of each known key; unknown keys are ignored
    fn from_query(query: QueryPairs) -> std::result::Result<Self, ApiError> {
        let Query(pairs) = query?;

        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "symbol" => &mut params.symbol,
                "analyze" => &mut params.analyze,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        Ok(params)
    }

    /// Symbol, treating an empty value as missing
    fn symbol(&self) -> std::result::Result<&str, ApiError> {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::from(StockError::MissingSymbol))
    }

    fn analyze(&self) -> bool {
        self.analyze.as_deref() == Some("true")
    }
}

async fn get_stock(
    State(state): State<AppState>,
    query: QueryPairs,
) -> std::result::Result<Json<Quote>, ApiError> {
    let params = StockParams::from_query(query)?;
    let symbol = params.symbol()?;
    tracing::info!(symbol, "Quote lookup");

    let quote = state.quotes.get_quote(symbol).await?;
    Ok(Json(quote))
}

async fn get_stock_news(
    State(state): State<AppState>,
    query: QueryPairs,
) -> std::result::Result<Response, ApiError> {
    let params = StockParams::from_query(query)?;
    let symbol = params.symbol()?;

    if params.analyze() {
        tracing::info!(symbol, "News analysis");
        let analysis: NewsAnalysis = state
            .summarizer
            .summarize(symbol)
            .await
            .map_err(|e| ApiError::internal("Failed to process stock news", &e))?;
        return Ok(Json(analysis).into_response());
    }

    tracing::info!(symbol, "News lookup");
    let items = state
        .news
        .get_news(symbol)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch stock news", &e))?;

    let news = items.iter().map(|item| item.without_link()).collect();
    Ok(Json(NewsResponse { news }).into_response())
}

/// Error body returned by every endpoint
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 500 with a fixed public message; the cause is only logged
    fn internal(message: &str, cause: &StockError) -> Self {
        tracing::error!("{}: {}", message, cause);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection);
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<StockError> for ApiError {
    fn from(error: StockError) -> Self {
        let status = StatusCode::from_u16(error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &error {
            StockError::MissingSymbol => tracing::debug!("Rejected request: {}", error),
            StockError::UpstreamValidation { detail } => {
                tracing::error!("Upstream validation failed: {}", detail);
            }
            _ => tracing::error!("Request failed: {}", error),
        }

        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
