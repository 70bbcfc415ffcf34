// src/research/search_client.rs
use super::types::SearchResponse;
use crate::config::SearchConfig;
use crate::types::Notices;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Context returned when a search yields no usable snippet
pub const NO_INFORMATION: &str = "No information found.";

const SEARCH_ENDPOINT: &str = "/search.json";

/// A search-results backend. Region and language preferences belong to the
/// implementation's configuration, not to the query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse>;
}

pub struct SerpApiClient {
    client: Client,
    config: SearchConfig,
}

impl SerpApiClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn query_params<'a>(&'a self, query: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("engine", self.config.engine.as_str()),
            ("q", query),
            ("api_key", self.config.api_key.as_str()),
            ("gl", self.config.country.as_str()),
            ("hl", self.config.language.as_str()),
        ]
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            SEARCH_ENDPOINT
        );

        info!("Searching SerpAPI: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .context("Failed to send request to SerpAPI")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read SerpAPI response body")?;

        // SerpAPI reports API-level failures as {"error": "..."}, with or without an error status
        let parsed = serde_json::from_str::<SearchResponse>(&body);

        if !status.is_success() {
            let detail = parsed
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| body.clone());
            anyhow::bail!("SerpAPI returned error {}: {}", status, detail);
        }

        let mut results = parsed.context("Failed to parse SerpAPI response")?;
        if let Some(message) = results.error.take() {
            if !results.search_succeeded() {
                anyhow::bail!("{}", message);
            }
            info!("SerpAPI found nothing for '{}': {}", query, message);
        }

        info!(
            "SerpAPI returned {} organic and {} news results",
            results.organic_results.len(),
            results.news_results.len()
        );
        Ok(results)
    }
}

/// Join the knowledge-panel description, organic snippets and news snippets,
/// in that order, skipping empty entries
pub fn flatten_snippets(results: &SearchResponse) -> String {
    let knowledge = results
        .knowledge_graph
        .as_ref()
        .and_then(|kg| kg.description.as_deref());

    let snippets: Vec<&str> = knowledge
        .into_iter()
        .chain(
            results
                .organic_results
                .iter()
                .chain(results.news_results.iter())
                .filter_map(|r| r.snippet.as_deref()),
        )
        .filter(|s| !s.is_empty())
        .collect();

    if snippets.is_empty() {
        NO_INFORMATION.to_string()
    } else {
        snippets.join("\n\n")
    }
}

/// Search with the degradation policy applied: failures become an error
/// notice and the [`NO_INFORMATION`] context
#[derive(Clone)]
pub struct SearchClient {
    provider: Arc<dyn SearchProvider>,
}

impl SearchClient {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub async fn context_for(&self, query: &str, notices: &mut Notices) -> String {
        match self.provider.search(query).await {
            Ok(results) => flatten_snippets(&results),
            Err(e) => {
                error!("SerpAPI search failed for '{}': {:#}", query, e);
                notices.error(format!("SerpAPI Error: {:#}", e));
                NO_INFORMATION.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{serve_once, unreachable_base_url};
    use crate::research::types::{KnowledgeGraph, ResultSnippet};
    use crate::types::NoticeLevel;

    fn snippet(text: &str) -> ResultSnippet {
        ResultSnippet {
            snippet: Some(text.to_string()),
        }
    }

    struct FixedProvider(Result<SearchResponse, String>);

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, _query: &str) -> Result<SearchResponse> {
            self.0.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    #[test]
    fn test_empty_response_yields_sentinel() {
        assert_eq!(flatten_snippets(&SearchResponse::default()), NO_INFORMATION);
    }

    #[test]
    fn test_snippet_order_and_empty_filtering() {
        let results = SearchResponse {
            knowledge_graph: Some(KnowledgeGraph {
                description: Some("Acme builds rockets".to_string()),
            }),
            organic_results: vec![snippet("organic one"), snippet(""), ResultSnippet::default()],
            news_results: vec![snippet("news one")],
            ..Default::default()
        };

        assert_eq!(
            flatten_snippets(&results),
            "Acme builds rockets\n\norganic one\n\nnews one"
        );
    }

    #[test]
    fn test_only_empty_snippets_yield_sentinel() {
        let results = SearchResponse {
            knowledge_graph: Some(KnowledgeGraph { description: None }),
            organic_results: vec![snippet("")],
            ..Default::default()
        };
        assert_eq!(flatten_snippets(&results), NO_INFORMATION);
    }

    #[test]
    fn test_parses_serpapi_payload_ignoring_unknown_fields() {
        let body = r#"{
            "search_metadata": {"status": "Success"},
            "knowledge_graph": {"title": "Acme", "description": "Acme Corp"},
            "organic_results": [{"position": 1, "title": "t", "snippet": "first"}, {"position": 2}],
            "news_results": [{"snippet": "headline"}]
        }"#;
        let results: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(flatten_snippets(&results), "Acme Corp\n\nfirst\n\nheadline");
    }

    #[test]
    fn test_query_params_carry_region_and_language() {
        let config = SearchConfig {
            api_key: "secret".to_string(),
            ..Default::default()
        };
        let client = SerpApiClient::new(config).unwrap();
        let params = client.query_params("Overview of Acme");
        assert_eq!(
            params,
            [
                ("engine", "google"),
                ("q", "Overview of Acme"),
                ("api_key", "secret"),
                ("gl", "in"),
                ("hl", "en"),
            ]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_sentinel_with_error_notice() {
        let client = SearchClient::new(Arc::new(FixedProvider(Err("connection refused".into()))));
        let mut notices = Notices::new();

        let context = client.context_for("anything", &mut notices).await;

        assert_eq!(context, NO_INFORMATION);
        assert_eq!(notices.count(NoticeLevel::Error), 1);
        let message = &notices.iter().next().unwrap().message;
        assert!(message.starts_with("SerpAPI Error:"));
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_successful_search_adds_no_notice() {
        let response = SearchResponse {
            organic_results: vec![snippet("hit")],
            ..Default::default()
        };
        let client = SearchClient::new(Arc::new(FixedProvider(Ok(response))));
        let mut notices = Notices::new();

        assert_eq!(client.context_for("q", &mut notices).await, "hit");
        assert!(notices.is_empty());
    }

    fn client_for(base_url: String) -> SerpApiClient {
        SerpApiClient::new(SearchConfig {
            api_key: "secret".to_string(),
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_region_and_language_on_the_wire() {
        let body = r#"{"search_metadata":{"status":"Success"},"organic_results":[{"snippet":"hit"}]}"#;
        let (base_url, server) = serve_once(200, body).await;

        let results = client_for(base_url).search("Overview of Acme").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(flatten_snippets(&results), "hit");
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /search.json?"));
        assert!(request_line.contains("engine=google"));
        assert!(request_line.contains("q=Overview+of+Acme"));
        assert!(request_line.contains("api_key=secret"));
        assert!(request_line.contains("gl=in"));
        assert!(request_line.contains("hl=en"));
    }

    #[tokio::test]
    async fn test_error_status_carries_api_message() {
        let (base_url, _server) = serve_once(401, r#"{"error":"Invalid API key."}"#).await;

        let err = client_for(base_url).search("q").await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("401"));
        assert!(message.contains("Invalid API key."));
    }

    #[tokio::test]
    async fn test_error_field_on_ok_status_is_a_failure() {
        let body = r#"{"error":"Your account has run out of searches."}"#;
        let (base_url, _server) = serve_once(200, body).await;

        let err = client_for(base_url).search("q").await.unwrap_err();
        assert!(format!("{:#}", err).contains("run out of searches"));
    }

    #[tokio::test]
    async fn test_no_results_is_not_an_error() {
        let body = r#"{
            "search_metadata": {"status": "Success"},
            "error": "Google hasn't returned any results for this query."
        }"#;
        let (base_url, _server) = serve_once(200, body).await;
        let client = SearchClient::new(Arc::new(client_for(base_url)));
        let mut notices = Notices::new();

        let context = client.context_for("Overview of Nobody", &mut notices).await;

        assert_eq!(context, NO_INFORMATION);
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_body_is_a_failure() {
        let (base_url, _server) = serve_once(200, "<html>oops</html>").await;

        let err = client_for(base_url).search("q").await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse SerpAPI response"));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_notice() {
        let client = SearchClient::new(Arc::new(client_for(unreachable_base_url().await)));
        let mut notices = Notices::new();

        let context = client.context_for("q", &mut notices).await;

        assert_eq!(context, NO_INFORMATION);
        assert_eq!(notices.count(NoticeLevel::Error), 1);
        assert!(notices
            .iter()
            .all(|n| n.message.starts_with("SerpAPI Error: Failed to send request")));
    }
}
