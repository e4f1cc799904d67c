//! Watchlist client
//!
//! Keeps the user's tracked symbols in durable storage and drives the quote
//! and news endpoints through [`StockApi`].

pub mod api;
pub mod display;
pub mod session;
pub mod settle;
pub mod store;
pub mod watchlist;

pub use api::{HttpStockApi, StockApi};
pub use session::{AnalysisReport, RefreshOutcome, RefreshSummary, WatchlistClient};
pub use settle::{MergeReport, Settled, merge_by_key, settle_all};
pub use store::{JsonFileStore, MemoryStore, WatchlistStore};
pub use watchlist::Watchlist;
