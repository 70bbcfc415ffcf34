// src/research/agent.rs
use super::extractor::{extract_json, PARSE_WARNING};
use super::model_client::{GeminiClient, LanguageModel};
use super::prompts;
use super::search_client::{SearchClient, SearchProvider, SerpApiClient};
use super::{ResearchKey, ResearchOutcome};
use crate::config::AgentConfig;
use crate::types::{Notices, Summary};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};

/// Runs company and role research and memoizes the outcome per
/// `(company, role)` for the lifetime of the agent
pub struct ResearchAgent {
    search: SearchClient,
    model: Arc<dyn LanguageModel>,
    cache: Mutex<HashMap<ResearchKey, ResearchOutcome>>,
    // one gate per key being computed; later callers wait, then read the cache
    in_flight: Mutex<HashMap<ResearchKey, Arc<AsyncMutex<()>>>>,
}

impl ResearchAgent {
    pub fn new(search: Arc<dyn SearchProvider>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            search: SearchClient::new(search),
            model,
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let search = SerpApiClient::new(config.search.clone())?;
        let model = GeminiClient::new(config.model.clone())?;
        Ok(Self::new(Arc::new(search), Arc::new(model)))
    }

    pub async fn research(&self, key: &ResearchKey) -> ResearchOutcome {
        if let Some(outcome) = self.cached(key) {
            debug!("Cache hit for {} / {}", key.company(), key.role());
            return outcome;
        }

        let gate = self.gate(key);
        let _running = gate.lock().await;
        if let Some(outcome) = self.cached(key) {
            debug!("Joined finished research for {} / {}", key.company(), key.role());
            return outcome;
        }

        info!("Starting research for {} / {}", key.company(), key.role());
        let outcome = self.run(key).await;

        self.cache().insert(key.clone(), outcome.clone());
        self.gates().remove(key);
        info!(
            "Research finished for {} / {} (company: {}, role: {})",
            key.company(),
            key.role(),
            outcome.company.is_some(),
            outcome.role.is_some()
        );
        outcome
    }

    pub fn cached(&self, key: &ResearchKey) -> Option<ResearchOutcome> {
        self.cache().get(key).cloned()
    }

    /// Drop one memoized outcome; returns whether an entry existed
    pub fn evict(&self, key: &ResearchKey) -> bool {
        self.cache().remove(key).is_some()
    }

    /// Drop every memoized outcome; returns how many were removed
    pub fn clear_cache(&self) -> usize {
        let mut cache = self.cache();
        let removed = cache.len();
        cache.clear();
        removed
    }

    pub fn cached_entries(&self) -> usize {
        self.cache().len()
    }

    async fn run(&self, key: &ResearchKey) -> ResearchOutcome {
        let mut notices = Notices::new();
        let (company, role) = (key.company(), key.role());

        let company_context = self
            .search
            .context_for(&prompts::company_query(company), &mut notices)
            .await;
        let company_summary = self
            .summarize(&prompts::company_prompt(company, &company_context), &mut notices)
            .await;

        let role_context = self
            .search
            .context_for(&prompts::role_query(company, role), &mut notices)
            .await;
        let role_summary = self
            .summarize(&prompts::role_prompt(company, role, &role_context), &mut notices)
            .await;

        ResearchOutcome {
            company: company_summary,
            role: role_summary,
            notices,
        }
    }

    async fn summarize(&self, prompt: &str, notices: &mut Notices) -> Option<Summary> {
        let text = match self.model.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Model call failed: {:#}", e);
                notices.error(format!("Gemini Error: {:#}", e));
                return None;
            }
        };

        match extract_json(&text) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Could not extract JSON from model output: {}", e);
                notices.warning(PARSE_WARNING);
                None
            }
        }
    }

    fn gate(&self, key: &ResearchKey) -> Arc<AsyncMutex<()>> {
        self.gates().entry(key.clone()).or_default().clone()
    }

    fn gates(&self) -> MutexGuard<'_, HashMap<ResearchKey, Arc<AsyncMutex<()>>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<ResearchKey, ResearchOutcome>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
