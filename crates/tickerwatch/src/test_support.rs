//! Hand-written fakes shared by unit tests

use crate::client::StockApi;
use crate::error::{Result, StockError};
use crate::models::{NewsAnalysis, NewsItem, Quote};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tickerwatch_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use tokio::sync::Semaphore;

/// Completion provider that replays a fixed answer and records requests
pub struct FakeLlm {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for FakeLlm {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> tickerwatch_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            Some(text) => Ok(CompletionResponse {
                message: Message::assistant(text.clone()),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 120,
                    output_tokens: 40,
                },
            }),
            None => Err(LLMError::Upstream("connection reset".to_string())),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Endpoint client serving canned quotes, optionally held behind a gate
#[derive(Default)]
pub struct FakeStockApi {
    quotes: Mutex<HashMap<String, Quote>>,
    failing: Mutex<HashSet<String>>,
    news_fails: bool,
    analysis_fails: bool,
    gate: Mutex<Option<Arc<Semaphore>>>,
    quote_calls: AtomicUsize,
}

impl FakeStockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(self, symbol: &str, price: f64) -> Self {
        self.set_price(symbol, price);
        self
    }

    /// From now on, quote calls wait for a permit on `gate` before answering
    pub fn hold_quotes(&self, gate: Arc<Semaphore>) {
        *self.gate.lock().unwrap() = Some(gate);
    }

    pub fn failing_news(mut self) -> Self {
        self.news_fails = true;
        self
    }

    pub fn failing_analysis(mut self) -> Self {
        self.analysis_fails = true;
        self
    }

    pub fn set_price(&self, symbol: &str, price: f64) {
        let mut quote = Quote::new(symbol, format!("{symbol} Inc."));
        quote.price = Some(price);
        self.quotes.lock().unwrap().insert(symbol.to_string(), quote);
    }

    pub fn fail(&self, symbol: &str) {
        self.failing.lock().unwrap().insert(symbol.to_string());
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    fn news_items(symbol: &str) -> Vec<NewsItem> {
        (1..=2)
            .map(|i| NewsItem {
                title: format!("{symbol} headline {i}"),
                snippet: format!("{symbol} snippet {i}"),
                source: "Newswire".to_string(),
                link: Some(format!("https://news.example.com/{symbol}/{i}")),
            })
            .collect()
    }
}

#[async_trait]
impl StockApi for FakeStockApi {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }

        if self.failing.lock().unwrap().contains(symbol) {
            return Err(StockError::Api {
                status: 500,
                message: format!("Failed to fetch data for {symbol}: HTTP 503"),
            });
        }

        self.quotes
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .ok_or_else(|| StockError::Api {
                status: 400,
                message: "Invalid stock data received".to_string(),
            })
    }

    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        if self.news_fails {
            return Err(StockError::Api {
                status: 500,
                message: "Failed to fetch stock news".to_string(),
            });
        }
        Ok(Self::news_items(symbol).iter().map(NewsItem::without_link).collect())
    }

    async fn analyze_news(&self, symbol: &str) -> Result<NewsAnalysis> {
        if self.analysis_fails {
            return Err(StockError::Api {
                status: 500,
                message: "Failed to process stock news".to_string(),
            });
        }
        Ok(NewsAnalysis {
            analysis: format!("{symbol} moved on earnings [[citation:1]]."),
            sources: Self::news_items(symbol),
        })
    }
}
