//! Configuration for provider clients and the news summarizer

use crate::error::{Result, StockError};
use std::time::Duration;
use tickerwatch_utils::{env_or, env_var, require_env};

/// Default Serper endpoint
pub const SERPER_API_BASE: &str = "https://google.serper.dev";

/// Default Yahoo Finance endpoint
pub const YAHOO_API_BASE: &str = "https://query1.finance.yahoo.com";

/// Default completion model served by Groq
pub const DEFAULT_MODEL: &str = "llama-3.2-3b-preview";

/// Provider credentials and sampling settings
#[derive(Debug, Clone)]
pub struct StockConfig {
    /// Serper search API key
    pub serper_api_key: String,

    /// Serper base URL
    pub serper_api_base: String,

    /// Groq API key
    pub groq_api_key: String,

    /// Groq OpenAI-compatible base URL
    pub groq_api_base: String,

    /// Completion model
    pub model: String,

    /// Sampling temperature for the summarizer
    pub temperature: f32,

    /// Maximum tokens in the summary
    pub max_tokens: usize,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Number of news results requested per symbol
    pub news_count: usize,

    /// Search recency window (Serper `tbs` value)
    pub news_recency: String,

    /// Yahoo Finance base URL
    pub yahoo_api_base: String,

    /// Timeout for completion requests
    pub llm_timeout: Duration,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            serper_api_key: String::new(),
            serper_api_base: SERPER_API_BASE.to_string(),
            groq_api_key: String::new(),
            groq_api_base: tickerwatch_llm::providers::GROQ_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.5,
            max_tokens: 1024,
            top_p: 1.0,
            news_count: 5,
            news_recency: "qdr:d".to_string(),
            yahoo_api_base: YAHOO_API_BASE.to_string(),
            llm_timeout: Duration::from_secs(120),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Load configuration from the environment
    ///
    /// `SERPER_API_KEY` and `GROQ_API_KEY` are required. `GROQ_API_BASE`,
    /// `GROQ_MODEL`, `SERPER_API_BASE` and `YAHOO_API_BASE` override defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            serper_api_key: require_env("SERPER_API_KEY")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_base: env_or("GROQ_API_BASE", &defaults.groq_api_base),
            serper_api_base: env_or("SERPER_API_BASE", &defaults.serper_api_base),
            yahoo_api_base: env_or("YAHOO_API_BASE", &defaults.yahoo_api_base),
            model: env_var("GROQ_MODEL").unwrap_or(defaults.model),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.serper_api_key.trim().is_empty() {
            return Err(StockError::ConfigError("Serper API key is required".to_string()));
        }

        if self.groq_api_key.trim().is_empty() {
            return Err(StockError::ConfigError("Groq API key is required".to_string()));
        }

        if self.news_count == 0 {
            return Err(StockError::ConfigError(
                "news_count must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StockError::ConfigError(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    serper_api_key: Option<String>,
    serper_api_base: Option<String>,
    groq_api_key: Option<String>,
    groq_api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    top_p: Option<f32>,
    news_count: Option<usize>,
    yahoo_api_base: Option<String>,
    llm_timeout: Option<Duration>,
}

impl StockConfigBuilder {
    /// Set the Serper API key
    pub fn serper_api_key(mut self, key: impl Into<String>) -> Self {
        self.serper_api_key = Some(key.into());
        self
    }

    /// Set the Serper base URL
    pub fn serper_api_base(mut self, base: impl Into<String>) -> Self {
        self.serper_api_base = Some(base.into());
        self
    }

    /// Set the Groq API key
    pub fn groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.groq_api_key = Some(key.into());
        self
    }

    /// Set the Groq base URL
    pub fn groq_api_base(mut self, base: impl Into<String>) -> Self {
        self.groq_api_base = Some(base.into());
        self
    }

    /// Set the completion model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the summary token cap
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set top-p
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the number of news results
    pub fn news_count(mut self, count: usize) -> Self {
        self.news_count = Some(count);
        self
    }

    /// Set the Yahoo Finance base URL
    pub fn yahoo_api_base(mut self, base: impl Into<String>) -> Self {
        self.yahoo_api_base = Some(base.into());
        self
    }

    /// Set the completion request timeout
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            serper_api_key: self.serper_api_key.unwrap_or(defaults.serper_api_key),
            serper_api_base: self.serper_api_base.unwrap_or(defaults.serper_api_base),
            groq_api_key: self.groq_api_key.unwrap_or(defaults.groq_api_key),
            groq_api_base: self.groq_api_base.unwrap_or(defaults.groq_api_base),
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            news_count: self.news_count.unwrap_or(defaults.news_count),
            news_recency: defaults.news_recency,
            yahoo_api_base: self.yahoo_api_base.unwrap_or(defaults.yahoo_api_base),
            llm_timeout: self.llm_timeout.unwrap_or(defaults.llm_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
