//! One-shot completion requests and their replies

use crate::Message;

/// Generation budget used when the caller does not set one
pub const DEFAULT_MAX_TOKENS: usize = 1024;

/// Everything a provider needs for a single completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    /// Leading instruction turn; sent before `messages`
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub max_tokens: usize,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl CompletionRequest {
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder(Self {
            model: model.into(),
            system: None,
            messages: Vec::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            top_p: None,
        })
    }

    /// The full turn list with the system prompt, if any, in front
    pub fn conversation(&self) -> Vec<Message> {
        self.system
            .iter()
            .map(Message::system)
            .chain(self.messages.iter().cloned())
            .collect()
    }
}

/// Fluent construction of a [`CompletionRequest`]
#[derive(Debug, Clone)]
pub struct CompletionRequestBuilder(CompletionRequest);

impl CompletionRequestBuilder {
    pub fn system(mut self, prompt: impl Into<String>) -> Self {
        self.0.system = Some(prompt.into());
        self
    }

    pub fn add_message(mut self, message: Message) -> Self {
        self.0.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, limit: usize) -> Self {
        self.0.max_tokens = limit;
        self
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.0.temperature = Some(value);
        self
    }

    pub fn top_p(mut self, value: f32) -> Self {
        self.0.top_p = Some(value);
        self
    }

    pub fn build(self) -> CompletionRequest {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

/// Why generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    /// Output was cut at `max_tokens`
    MaxTokens,
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason`; unknown values count as a normal end
    pub fn from_finish_reason(reason: Option<&str>) -> Self {
        match reason {
            Some("length") => Self::MaxTokens,
            _ => Self::EndTurn,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn test_builder_sets_sampling() {
        let request = CompletionRequest::builder("llama-3.2-3b-preview")
            .system("You summarize market news")
            .add_message(Message::user("What happened with AAPL?"))
            .max_tokens(512)
            .temperature(0.5)
            .top_p(1.0)
            .build();

        assert_eq!(request.model, "llama-3.2-3b-preview");
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.top_p, Some(1.0));
    }

    #[test]
    fn test_unset_fields() {
        let request = CompletionRequest::builder("m").build();
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.temperature, None);
        assert!(request.conversation().is_empty());
    }

    #[test]
    fn test_conversation_puts_system_first() {
        let request = CompletionRequest::builder("m")
            .add_message(Message::user("q"))
            .system("rules")
            .build();

        let turns = request.conversation();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], Message::system("rules"));
        assert_eq!(turns[1].role, Role::User);
    }

    #[test]
    fn test_finish_reason() {
        assert_eq!(StopReason::from_finish_reason(Some("length")), StopReason::MaxTokens);
        assert_eq!(StopReason::from_finish_reason(Some("stop")), StopReason::EndTurn);
        assert_eq!(StopReason::from_finish_reason(Some("content_filter")), StopReason::EndTurn);
        assert_eq!(StopReason::from_finish_reason(None), StopReason::EndTurn);
    }

    #[test]
    fn test_usage_total() {
        let usage = TokenUsage {
            input_tokens: 120,
            output_tokens: 40,
        };
        assert_eq!(usage.total(), 160);
    }
}
