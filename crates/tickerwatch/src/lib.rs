//! Stock watchlist backend and client
//!
//! This crate aggregates three external providers behind a small HTTP
//! boundary and drives a watchlist client against it:
//!
//! - Quote lookup from the Yahoo Finance chart API
//! - Recent news lookup from Serper web search
//! - News summaries from an OpenAI-compatible completion provider (Groq)
//! - A watchlist client with durable storage, concurrent refresh and
//!   side-by-side news analysis
//!
//! # Example
//!
//! ```rust,ignore
//! use tickerwatch::{AppState, StockConfig, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StockConfig::from_env()?;
//!     let state = AppState::from_config(&config)?;
//!     server::serve("127.0.0.1:3000".parse()?, state).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod prompts;
pub mod quote;
pub mod server;
pub mod summarizer;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use client::{
    HttpStockApi, JsonFileStore, MemoryStore, StockApi, WatchlistClient, WatchlistStore,
};
pub use config::StockConfig;
pub use error::{ErrorKind, Result, StockError};
pub use models::{NewsAnalysis, NewsItem, Quote};
pub use news::NewsFetcher;
pub use quote::QuoteFetcher;
pub use server::{AppState, create_router};
pub use summarizer::NewsSummarizer;
