//! Chat-completion client layer used by the tickerwatch news summarizer
//!
//! A [`CompletionRequest`] goes in, one assistant [`Message`] comes out.
//! [`LLMProvider`] is the seam; the `openai` feature supplies a client for
//! any OpenAI-compatible endpoint, Groq included.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

#[cfg(feature = "openai")]
pub mod providers;

pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, DEFAULT_MAX_TOKENS,
    StopReason, TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
