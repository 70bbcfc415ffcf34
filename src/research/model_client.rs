// src/research/model_client.rs
use super::types::{ApiErrorEnvelope, Content, GenerateRequest, GenerateResponse, Part};
use crate::config::ModelConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

/// A generative language model: one text prompt in, one text response out
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiClient {
    client: Client,
    config: ModelConfig,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        info!("Sending prompt to Gemini model {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);
            error!("Gemini API error {}: {}", status, detail);
            anyhow::bail!("Gemini API returned error {}: {}", status, detail);
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = response_text(generated)?;
        info!("Received {} characters from Gemini", text.len());
        Ok(text)
    }
}

/// Concatenated text parts of the first candidate
fn response_text(response: GenerateResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .context("Gemini API returned no candidates")?;

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    Ok(text)
}
