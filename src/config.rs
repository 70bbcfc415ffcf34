// src/config.rs
//! Agent configuration: optional YAML file, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "research_agent.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_search_url")]
    pub base_url: String,
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Region preference, sent as `gl`
    #[serde(default = "default_country")]
    pub country: String,
    /// Interface language, sent as `hl`
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_search_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_search_url() -> String {
    "https://serpapi.com".to_string()
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_country() -> String {
    "in".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_search_timeout() -> u64 {
    30
}

fn default_model_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_model_timeout() -> u64 {
    60
}

fn default_port() -> u16 {
    8000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_search_url(),
            engine: default_engine(),
            country: default_country(),
            language: default_language(),
            timeout_seconds: default_search_timeout(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_model_url(),
            model: default_model(),
            timeout_seconds: default_model_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl AgentConfig {
    /// Load the config file (if any), apply environment overrides and validate
    pub fn load() -> Result<Self> {
        let path = std::env::var("RESEARCH_AGENT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::from_file(&path)?
        } else {
            info!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Invalid configuration YAML")
    }

    /// Apply overrides from a variable lookup; `load` passes the process environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("SERPAPI_API_KEY") {
            self.search.api_key = key;
        }
        if let Some(url) = lookup("SERPAPI_BASE_URL") {
            self.search.base_url = url;
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.model.api_key = key;
        }
        if let Some(url) = lookup("GEMINI_BASE_URL") {
            self.model.base_url = url;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model.model = model;
        }
        if let Some(port) = lookup("RESEARCH_AGENT_PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("RESEARCH_AGENT_PORT must be a valid port number"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.api_key.trim().is_empty() {
            anyhow::bail!("SERPAPI_API_KEY environment variable not set");
        }
        if self.model.api_key.trim().is_empty() {
            anyhow::bail!("GEMINI_API_KEY environment variable not set");
        }
        Ok(())
    }
}
