use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A backend that turns one [`CompletionRequest`] into one reply.
///
/// Implementors must be shareable across tasks; the server holds a single
/// provider behind an `Arc` for every request it handles.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short label for logs and error messages, e.g. `groq`
    fn name(&self) -> &str;
}
