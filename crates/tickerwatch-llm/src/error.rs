//! Failure modes of a completion round-trip

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("completion provider returned an error: {0}")]
    Upstream(String),

    #[error("completion provider rejected the API key")]
    Unauthorized,

    #[error("completion provider is throttling requests: {0}")]
    RateLimited(String),

    #[error("completion request was rejected: {0}")]
    Rejected(String),

    #[error("model `{0}` is not served by this provider")]
    UnknownModel(String),

    #[error("could not read completion payload: {0}")]
    MalformedResponse(String),

    #[cfg(feature = "openai")]
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider is misconfigured: {0}")]
    Config(String),
}

impl LLMError {
    /// Classify a non-success HTTP reply
    pub fn from_status(status: u16, body: String, model: &str) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            429 => Self::RateLimited(body),
            400 | 422 => Self::Rejected(body),
            404 => Self::UnknownModel(model.to_string()),
            _ => Self::Upstream(format!("HTTP {status}: {body}")),
        }
    }
}
