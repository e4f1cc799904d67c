//! News summarizer: answers "what happened" for a symbol from recent news

use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::models::NewsAnalysis;
use crate::news::NewsFetcher;
use crate::prompts::{build_context, news_question, render_system_prompt};
use std::sync::Arc;
use tickerwatch_llm::{CompletionRequest, LLMProvider, Message};

/// Builds a cited prompt from news results and asks the completion provider
#[derive(Clone)]
pub struct NewsSummarizer {
    news: NewsFetcher,
    llm: Arc<dyn LLMProvider>,
    model: String,
    temperature: f32,
    max_tokens: usize,
    top_p: f32,
}

impl NewsSummarizer {
    /// Summarizer using the sampling settings from `config`
    pub fn new(news: NewsFetcher, llm: Arc<dyn LLMProvider>, config: &StockConfig) -> Self {
        Self {
            news,
            llm,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
        }
    }

    /// Summarize recent news for `symbol`
    ///
    /// The returned sources are exactly the list the prompt cites, in order.
    #[tracing::instrument(skip(self))]
    pub async fn summarize(&self, symbol: &str) -> Result<NewsAnalysis> {
        let sources = self.news.get_news(symbol).await?;

        let question = news_question(symbol);
        let context = build_context(&sources);
        let system = render_system_prompt(&context, &question, self.max_tokens)?;

        let request = CompletionRequest::builder(&self.model)
            .system(system)
            .add_message(Message::user(question))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .top_p(self.top_p)
            .build();

        tracing::debug!(
            "Requesting summary from {} with {} sources",
            self.llm.name(),
            sources.len()
        );
        let response = self.llm.complete(request).await?;

        let Some(analysis) = response.message.text().map(str::to_string) else {
            return Err(StockError::upstream(
                self.llm.name(),
                "completion returned no content",
            ));
        };

        tracing::info!(
            "Summarized {} ({} tokens used)",
            symbol,
            response.usage.total()
        );

        Ok(NewsAnalysis { analysis, sources })
    }
}
