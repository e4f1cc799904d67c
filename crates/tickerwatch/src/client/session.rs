//! Watchlist client: add, remove, refresh and analyze tracked symbols

use crate::client::api::StockApi;
use crate::client::settle::settle_all;
use crate::client::store::WatchlistStore;
use crate::client::watchlist::Watchlist;
use crate::error::{Result, StockError};
use crate::models::{NewsAnalysis, NewsItem, Quote};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of a refresh-all request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Another refresh was in flight, or nothing is tracked
    Skipped,
    Completed(RefreshSummary),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Entries replaced with a fresh quote
    pub replaced: usize,
    /// Symbols whose refetch failed and kept their previous quote
    pub stale: Vec<String>,
}

/// Quote snapshot plus independently settled news and analysis
#[derive(Debug)]
pub struct AnalysisReport {
    pub quote: Quote,
    pub news: Result<Vec<NewsItem>>,
    pub analysis: Result<NewsAnalysis>,
}

#[derive(Debug, Default)]
struct ClientState {
    watchlist: Watchlist,
    pending: Option<Quote>,
}

struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates lookups and keeps the persisted watchlist in sync
pub struct WatchlistClient {
    api: Arc<dyn StockApi>,
    store: Arc<dyn WatchlistStore>,
    state: Mutex<ClientState>,
    refreshing: AtomicBool,
}

/// Trimmed, uppercased symbol; empty input is a missing symbol
fn normalize_symbol(input: &str) -> Result<String> {
    let symbol = input.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(StockError::MissingSymbol);
    }
    Ok(symbol)
}

impl WatchlistClient {
    /// Create a client, loading the stored watchlist once
    pub fn new(api: Arc<dyn StockApi>, store: Arc<dyn WatchlistStore>) -> Self {
        let watchlist = store.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load watchlist, starting empty: {}", e);
            Watchlist::default()
        });
        tracing::info!("Loaded watchlist with {} symbols", watchlist.len());

        Self {
            api,
            store,
            state: Mutex::new(ClientState {
                watchlist,
                pending: None,
            }),
            refreshing: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the tracked quotes in order
    pub fn quotes(&self) -> Vec<Quote> {
        self.state().watchlist.quotes().to_vec()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.state().watchlist.contains(&symbol.trim().to_uppercase())
    }

    /// Candidate waiting for confirmation, if any
    pub fn pending(&self) -> Option<Quote> {
        self.state().pending.clone()
    }

    /// Look up `input` and hold it as the pending add
    ///
    /// A symbol that is already tracked is rejected and nothing changes.
    pub async fn search(&self, input: &str) -> Result<Quote> {
        let symbol = normalize_symbol(input)?;
        let quote = self.api.get_quote(&symbol).await?;

        let mut state = self.state();
        if state.watchlist.contains(&symbol) || state.watchlist.contains(&quote.symbol) {
            return Err(StockError::AlreadyTracked(symbol));
        }
        state.pending = Some(quote.clone());
        Ok(quote)
    }

    /// Append the pending candidate and persist
    ///
    /// Returns `Ok(None)` when nothing was pending.
    pub fn confirm_add(&self) -> Result<Option<Quote>> {
        let mut state = self.state();
        let Some(quote) = state.pending.take() else {
            return Ok(None);
        };

        if !state.watchlist.add(quote.clone()) {
            return Err(StockError::AlreadyTracked(quote.symbol));
        }
        self.store.save(&state.watchlist)?;
        tracing::info!("Added {} to watchlist", quote.symbol);
        Ok(Some(quote))
    }

    /// Discard the pending candidate
    pub fn cancel_add(&self) -> Option<Quote> {
        self.state().pending.take()
    }

    /// Stop tracking `symbol`; absent symbols are a no-op returning `false`
    pub fn remove(&self, symbol: &str) -> Result<bool> {
        let symbol = normalize_symbol(symbol)?;
        let mut state = self.state();
        if !state.watchlist.remove(&symbol) {
            return Ok(false);
        }
        self.store.save(&state.watchlist)?;
        tracing::info!("Removed {} from watchlist", symbol);
        Ok(true)
    }

    /// Refetch every tracked quote concurrently
    ///
    /// Successes replace entries in place and failures keep the old quote.
    /// Symbols removed while the refresh runs stay removed.
    pub async fn refresh_all(&self) -> Result<RefreshOutcome> {
        if self.refreshing.swap(true, Ordering::SeqCst) {
            tracing::debug!("Refresh already in flight");
            return Ok(RefreshOutcome::Skipped);
        }
        let _guard = RefreshGuard(&self.refreshing);

        let symbols = self.state().watchlist.symbols();
        if symbols.is_empty() {
            return Ok(RefreshOutcome::Skipped);
        }

        let api = Arc::clone(&self.api);
        let settled = settle_all(symbols, |symbol: String| {
            let api = Arc::clone(&api);
            async move { api.get_quote(&symbol).await }
        })
        .await;

        let mut state = self.state();
        let report = state.watchlist.merge_refreshed(settled);

        for (symbol, e) in &report.failed {
            tracing::warn!("Failed to refresh {}: {}", symbol, e);
        }
        if report.replaced > 0 {
            self.store.save(&state.watchlist)?;
        }

        tracing::info!(
            "Refreshed {} symbols, {} stale, {} dropped",
            report.replaced,
            report.failed.len(),
            report.dropped
        );

        Ok(RefreshOutcome::Completed(RefreshSummary {
            replaced: report.replaced,
            stale: report.failed.into_iter().map(|(symbol, _)| symbol).collect(),
        }))
    }

    /// Fetch plain news and the summarized analysis for a tracked symbol
    ///
    /// Both requests run concurrently and settle independently.
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisReport> {
        let symbol = normalize_symbol(symbol)?;
        let quote = self
            .state()
            .watchlist
            .get(&symbol)
            .cloned()
            .ok_or_else(|| StockError::NotTracked(symbol.clone()))?;

        let (news, analysis) = tokio::join!(
            self.api.get_news(&symbol),
            self.api.analyze_news(&symbol)
        );

        Ok(AnalysisReport {
            quote,
            news,
            analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::MemoryStore;
    use crate::test_support::FakeStockApi;
    use tokio::sync::Semaphore;

    fn client_with(api: Arc<FakeStockApi>, store: Arc<MemoryStore>) -> WatchlistClient {
        WatchlistClient::new(api, store)
    }

    async fn add(client: &WatchlistClient, symbol: &str) {
        client.search(symbol).await.unwrap();
        client.confirm_add().unwrap().unwrap();
    }

    fn prices(client: &WatchlistClient) -> Vec<(String, Option<f64>)> {
        client
            .quotes()
            .into_iter()
            .map(|q| (q.symbol, q.price))
            .collect()
    }

    #[tokio::test]
    async fn test_search_normalizes_and_holds_pending() {
        let api = Arc::new(FakeStockApi::new().with_quote("AAPL", 190.0));
        let client = client_with(api, Arc::new(MemoryStore::new()));

        let quote = client.search("  aapl ").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(client.pending().map(|q| q.symbol).as_deref(), Some("AAPL"));
        assert!(client.quotes().is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_input() {
        let api = Arc::new(FakeStockApi::new());
        let client = client_with(api.clone(), Arc::new(MemoryStore::new()));

        let err = client.search("   ").await.unwrap_err();
        assert!(matches!(err, StockError::MissingSymbol));
        assert_eq!(api.quote_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_twice_is_rejected() {
        let api = Arc::new(FakeStockApi::new().with_quote("AAPL", 190.0));
        let store = Arc::new(MemoryStore::new());
        let client = client_with(api, store.clone());

        add(&client, "AAPL").await;
        let err = client.search("AAPL").await.unwrap_err();

        assert!(matches!(err, StockError::AlreadyTracked(ref s) if s == "AAPL"));
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
        assert_eq!(client.quotes().len(), 1);
        assert_eq!(client.pending(), None);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_add() {
        let api = Arc::new(FakeStockApi::new().with_quote("MSFT", 410.0));
        let store = Arc::new(MemoryStore::new());
        let client = client_with(api, store.clone());

        client.search("msft").await.unwrap();
        assert_eq!(client.cancel_add().map(|q| q.symbol).as_deref(), Some("MSFT"));
        assert_eq!(client.confirm_add().unwrap(), None);
        assert!(client.quotes().is_empty());
        assert_eq!(store.blob(), None);
    }

    #[tokio::test]
    async fn test_remove_persists_and_absent_is_noop() {
        let api = Arc::new(FakeStockApi::new().with_quote("AAPL", 1.0).with_quote("MSFT", 2.0));
        let store = Arc::new(MemoryStore::new());
        let client = client_with(api.clone(), store.clone());
        add(&client, "AAPL").await;
        add(&client, "MSFT").await;
        let calls = api.quote_calls();

        assert!(!client.remove("TSLA").unwrap());
        assert!(client.remove("aapl").unwrap());

        assert_eq!(store.load().unwrap().symbols(), vec!["MSFT"]);
        assert_eq!(api.quote_calls(), calls);
    }

    #[tokio::test]
    async fn test_reload_from_store() {
        let api = Arc::new(FakeStockApi::new().with_quote("AAPL", 1.0).with_quote("GOOG", 3.0));
        let store = Arc::new(MemoryStore::new());
        let client = client_with(api.clone(), store.clone());
        add(&client, "GOOG").await;
        add(&client, "AAPL").await;

        let reloaded = client_with(api, store);
        assert_eq!(prices(&reloaded), prices(&client));
    }

    #[tokio::test]
    async fn test_refresh_empty_makes_no_calls() {
        let api = Arc::new(FakeStockApi::new());
        let client = client_with(api.clone(), Arc::new(MemoryStore::new()));

        assert_eq!(client.refresh_all().await.unwrap(), RefreshOutcome::Skipped);
        assert_eq!(api.quote_calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_keeps_stale_on_failure() {
        let api = Arc::new(
            FakeStockApi::new()
                .with_quote("AAPL", 1.0)
                .with_quote("MSFT", 2.0)
                .with_quote("GOOG", 3.0),
        );
        let client = client_with(api.clone(), Arc::new(MemoryStore::new()));
        for symbol in ["AAPL", "MSFT", "GOOG"] {
            add(&client, symbol).await;
        }

        api.set_price("AAPL", 10.0);
        api.set_price("GOOG", 30.0);
        api.fail("MSFT");

        let outcome = client.refresh_all().await.unwrap();
        assert_eq!(
            outcome,
            RefreshOutcome::Completed(RefreshSummary {
                replaced: 2,
                stale: vec!["MSFT".to_string()],
            })
        );
        assert_eq!(
            prices(&client),
            vec![
                ("AAPL".to_string(), Some(10.0)),
                ("MSFT".to_string(), Some(2.0)),
                ("GOOG".to_string(), Some(30.0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_refresh_does_not_resurrect_removed_symbol() {
        let api = Arc::new(FakeStockApi::new().with_quote("AAPL", 1.0).with_quote("MSFT", 2.0));
        let store = Arc::new(MemoryStore::new());
        let client = client_with(api.clone(), store.clone());
        add(&client, "AAPL").await;
        add(&client, "MSFT").await;
        api.set_price("MSFT", 20.0);

        let gate = Arc::new(Semaphore::new(0));
        api.hold_quotes(gate.clone());

        let (outcome, ()) = tokio::join!(client.refresh_all(), async {
            client.remove("MSFT").unwrap();
            gate.add_permits(1);
        });

        assert!(matches!(outcome.unwrap(), RefreshOutcome::Completed(_)));
        assert_eq!(client.quotes().len(), 1);
        assert!(!client.contains("MSFT"));
        assert_eq!(store.load().unwrap().symbols(), vec!["AAPL"]);
    }

    #[tokio::test]
    async fn test_refresh_in_flight_is_skipped() {
        let api = Arc::new(FakeStockApi::new().with_quote("AAPL", 1.0));
        let client = client_with(api.clone(), Arc::new(MemoryStore::new()));
        add(&client, "AAPL").await;

        let gate = Arc::new(Semaphore::new(0));
        api.hold_quotes(gate.clone());

        let (first, second) = tokio::join!(client.refresh_all(), async {
            let second = client.refresh_all().await;
            gate.add_permits(1);
            second
        });

        assert!(matches!(first.unwrap(), RefreshOutcome::Completed(_)));
        assert_eq!(second.unwrap(), RefreshOutcome::Skipped);

        // flag is released once the first refresh settles
        assert!(matches!(
            client.refresh_all().await.unwrap(),
            RefreshOutcome::Completed(_)
        ));
    }

    #[tokio::test]
    async fn test_analyze_reports_results_independently() {
        let api = Arc::new(FakeStockApi::new().with_quote("NVDA", 900.0).failing_news());
        let client = client_with(api, Arc::new(MemoryStore::new()));
        add(&client, "NVDA").await;

        let report = client.analyze("nvda").await.unwrap();
        assert_eq!(report.quote.symbol, "NVDA");
        assert_eq!(report.news.unwrap_err().to_string(), "Failed to fetch stock news");

        let analysis = report.analysis.unwrap();
        assert_eq!(analysis.sources.len(), 2);
        assert!(analysis.sources.iter().all(|s| s.link.is_some()));
    }

    #[tokio::test]
    async fn test_analyze_untracked_symbol() {
        let api = Arc::new(FakeStockApi::new().failing_analysis());
        let client = client_with(api, Arc::new(MemoryStore::new()));

        let err = client.analyze("AAPL").await.unwrap_err();
        assert!(matches!(err, StockError::NotTracked(_)));
    }
}
