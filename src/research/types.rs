use serde::{Deserialize, Serialize};

// SerpAPI response, reduced to the sections that feed the search context
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    pub organic_results: Vec<ResultSnippet>,
    #[serde(default)]
    pub news_results: Vec<ResultSnippet>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResponse {
    /// SerpAPI ran the search. An `error` next to a `Success` status only
    /// means the search had no results.
    pub fn search_succeeded(&self) -> bool {
        self.search_metadata
            .as_ref()
            .and_then(|m| m.status.as_deref())
            == Some("Success")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSnippet {
    #[serde(default)]
    pub snippet: Option<String>,
}

// Gemini generateContent request/response
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

// Error body returned by the model API on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub message: String,
}
