//! Prompt templates for the news summarizer

use crate::error::Result;
use crate::models::NewsItem;
use minijinja::{Environment, context};

/// System instruction for answering from search context
///
/// Rendered with `context`, `question` and `max_tokens`.
pub const NEWS_SUMMARY_TEMPLATE: &str = r#"You are a financial news assistant. You are given a user question and a set of search results related to it. Write a clean, concise and accurate answer to the question using only those results.

Your answer must be correct, accurate and written by an expert in an unbiased and professional tone. Limit the answer to {{ max_tokens }} tokens. Do not include information unrelated to the question and do not repeat yourself. If the results do not provide enough information, say "information is missing on" followed by the related topic.

Here are the search results:

{{ context }}

Do not repeat the search results verbatim. Here is the user question:
{{ question }}"#;

/// Question asked of the model for `symbol`
pub fn news_question(symbol: &str) -> String {
    format!("What happened with {symbol} stock in the last 24 hours?")
}

/// Numbered citation block, one entry per source in order
pub fn build_context(sources: &[NewsItem]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, item)| format!("[[citation:{}]] {} - {}", i + 1, item.title, item.snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the system instruction
pub fn render_system_prompt(context: &str, question: &str, max_tokens: usize) -> Result<String> {
    let env = Environment::new();
    let rendered = env.render_str(
        NEWS_SUMMARY_TEMPLATE,
        context! { context, question, max_tokens },
    )?;
    Ok(rendered)
}
