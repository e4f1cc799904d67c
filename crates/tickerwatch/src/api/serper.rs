//! Serper web search client

use crate::config::SERPER_API_BASE;
use crate::error::{Result, StockError};
use crate::news::{SearchProvider, SearchQuery, SearchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
    tbs: &'a str,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    source: Option<String>,
}

impl From<OrganicResult> for SearchResult {
    fn from(result: OrganicResult) -> Self {
        let source = result
            .source
            .filter(|s| !s.trim().is_empty())
            .or_else(|| link_host(&result.link))
            .unwrap_or_default();

        SearchResult {
            title: result.title,
            snippet: result.snippet,
            source,
            link: result.link,
        }
    }
}

/// Host of `link` without a leading `www.`
fn link_host(link: &str) -> Option<String> {
    let url = url::Url::parse(link).ok()?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Serper client for Google search results
pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerperClient {
    /// Create a new Serper client
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, SERPER_API_BASE)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.base_url);
        let body = SerperRequest {
            q: &query.query,
            num: query.num,
            tbs: &query.recency,
        };

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| StockError::upstream("Serper", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::upstream(
                "Serper",
                format!("HTTP {status}: {body}"),
            ));
        }

        let parsed = response
            .json::<SerperResponse>()
            .await
            .map_err(|e| StockError::upstream("Serper", format!("Failed to parse response: {e}")))?;

        Ok(parsed
            .organic
            .into_iter()
            .take(query.num)
            .map(SearchResult::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query() -> SearchQuery {
        SearchQuery {
            query: "AAPL stock news".to_string(),
            num: 5,
            recency: "qdr:d".to_string(),
        }
    }

    #[test]
    fn test_link_host() {
        assert_eq!(
            link_host("https://www.reuters.com/markets/apple").as_deref(),
            Some("reuters.com")
        );
        assert_eq!(link_host("not a url"), None);
    }

    #[tokio::test]
    async fn test_search_request_and_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "test-key"))
            .and(body_json(json!({"q": "AAPL stock news", "num": 5, "tbs": "qdr:d"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "searchParameters": {"q": "AAPL stock news"},
                "organic": [
                    {"title": "Apple rallies", "snippet": "Shares up", "link": "https://www.cnbc.com/a", "source": "CNBC"},
                    {"title": "iPhone demand", "snippet": "Strong", "link": "https://www.bloomberg.com/b"},
                    {"title": "No link", "snippet": "?"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SerperClient::with_base_url("test-key", server.uri());
        let results = client.search(&query()).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].source, "CNBC");
        assert_eq!(results[1].source, "bloomberg.com");
        assert_eq!(results[1].link, "https://www.bloomberg.com/b");
        assert_eq!(results[2].source, "");
    }

    #[tokio::test]
    async fn test_missing_organic_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credits": 1})))
            .mount(&server)
            .await;

        let client = SerperClient::with_base_url("test-key", server.uri());
        assert!(client.search(&query()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client = SerperClient::with_base_url("bad-key", server.uri());
        let err = client.search(&query()).await.unwrap_err();

        assert!(matches!(err, StockError::Upstream { .. }));
        assert_eq!(err.status_code(), 500);
    }
}
