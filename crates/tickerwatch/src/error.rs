//! Error types for watchlist operations

use thiserror::Error;

/// Coarse classification every error maps onto
///
/// The HTTP boundary derives its status code from this, and the client uses it
/// to decide whether a failure was the user's input or an upstream problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed request parameter (400)
    InvalidInput,
    /// Provider returned data failing shape checks (400)
    UpstreamValidation,
    /// Network or HTTP failure talking to a provider (500)
    UpstreamTransport,
    /// Anything uncategorized (500)
    Unexpected,
}

impl ErrorKind {
    /// HTTP-equivalent status code for this kind
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidInput | ErrorKind::UpstreamValidation => 400,
            ErrorKind::UpstreamTransport | ErrorKind::Unexpected => 500,
        }
    }
}

/// Stock watchlist errors
#[derive(Debug, Error)]
pub enum StockError {
    /// No symbol was supplied
    #[error("Stock symbol is required")]
    MissingSymbol,

    /// Symbol is already tracked in the watchlist
    #[error("{0} is already in your watchlist")]
    AlreadyTracked(String),

    /// Symbol is not tracked in the watchlist
    #[error("{0} is not in your watchlist")]
    NotTracked(String),

    /// Quote provider returned data that does not have the expected shape
    #[error("Invalid stock data received")]
    UpstreamValidation {
        /// What was wrong with the payload (logged, not shown)
        detail: String,
    },

    /// Quote provider request failed at the transport or HTTP level
    #[error("Failed to fetch data for {symbol}: {message}")]
    UpstreamHttp {
        symbol: String,
        message: String,
    },

    /// Search or other provider request failed
    #[error("{provider} request failed: {message}")]
    Upstream {
        provider: String,
        message: String,
    },

    /// Completion provider failed
    #[error("Completion failed: {0}")]
    Completion(#[from] tickerwatch_llm::LLMError),

    /// The watchlist server answered with an error payload
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Prompt template error
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// Filesystem or socket error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl StockError {
    /// Taxonomy bucket for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::MissingSymbol
            | StockError::AlreadyTracked(_)
            | StockError::NotTracked(_) => ErrorKind::InvalidInput,
            StockError::UpstreamValidation { .. } => ErrorKind::UpstreamValidation,
            StockError::UpstreamHttp { .. }
            | StockError::Upstream { .. }
            | StockError::Completion(_)
            | StockError::NetworkError(_) => ErrorKind::UpstreamTransport,
            StockError::Api { status, .. } if *status < 500 => ErrorKind::InvalidInput,
            StockError::Api { .. } => ErrorKind::UpstreamTransport,
            StockError::JsonError(_)
            | StockError::TemplateError(_)
            | StockError::IoError(_)
            | StockError::ConfigError(_)
            | StockError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// HTTP-equivalent status code
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Build an upstream failure for a named provider
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        StockError::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl From<tickerwatch_utils::EnvError> for StockError {
    fn from(err: tickerwatch_utils::EnvError) -> Self {
        StockError::ConfigError(err.to_string())
    }
}

/// Result type alias for watchlist operations
pub type Result<T> = std::result::Result<T, StockError>;
