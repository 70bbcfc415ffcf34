// src/research/mod.rs
use crate::types::{Notices, Summary};
use serde::{Deserialize, Serialize};

pub mod agent;
pub mod extractor;
pub mod model_client;
pub mod prompts;
pub mod search_client;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::ResearchAgent;
pub use extractor::{extract_json, ExtractError, PARSE_WARNING};
pub use model_client::{GeminiClient, LanguageModel};
pub use search_client::{flatten_snippets, SearchClient, SearchProvider, SerpApiClient, NO_INFORMATION};

/// Warning shown when either input is missing
pub const MISSING_INPUT_WARNING: &str = "Please enter both a company name and a job role.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
}

impl ResearchRequest {
    pub fn key(&self) -> Option<ResearchKey> {
        ResearchKey::new(&self.company, &self.role)
    }
}

/// Validated `(company, role)` pair; also the memoization key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResearchKey {
    company: String,
    role: String,
}

impl ResearchKey {
    /// Trimmed inputs, or `None` when either is blank
    pub fn new(company: &str, role: &str) -> Option<Self> {
        let (company, role) = (company.trim(), role.trim());
        if company.is_empty() || role.is_empty() {
            return None;
        }

        Some(Self {
            company: company.to_string(),
            role: role.to_string(),
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

/// Result of one research run: either summary may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResearchOutcome {
    pub company: Option<Summary>,
    pub role: Option<Summary>,
    pub notices: Notices,
}

impl ResearchOutcome {
    pub fn has_data(&self) -> bool {
        self.company.is_some() || self.role.is_some()
    }
}
