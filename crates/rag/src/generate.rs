//! Generation capability: the trait seam and the Ollama reference client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use binlore_core::GenerationConfig;
use reqwest::{Client, ClientBuilder};
use serde_json::json;
use tracing::debug;

/// Produces a completion for a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Ollama generation client.
#[derive(Clone)]
pub struct OllamaGenerator {
    /// HTTP client
    client: Client,

    /// Backend settings
    config: GenerationConfig,
}

impl OllamaGenerator {
    /// Create a client with a 120 second request timeout.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            config,
        }
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        });

        debug!("Requesting completion ({} prompt chars)", prompt.len());

        let response = self
            .client
            .post(&format!("{}/api/generate", self.config.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to call generation API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Generation API error (status {}): {}", status, error_text);
        }

        #[derive(serde::Deserialize)]
        struct Response {
            response: String,
        }

        let response_data: Response = response
            .json()
            .await
            .context("Failed to parse generation response")?;

        Ok(response_data.response)
    }
}
