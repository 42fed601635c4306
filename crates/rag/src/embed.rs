//! Embedding capability: the trait seam and the Ollama reference client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use binlore_core::EmbeddingConfig;
use reqwest::{Client, ClientBuilder};
use serde_json::json;
use tracing::debug;

/// Turns text into vectors.
///
/// The index and knowledge base only see this seam, so tests can supply
/// a deterministic stand-in.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, in order.
    ///
    /// The default loops `embed` and stops at the first failure: a dead
    /// backend must abort index construction, not degrade it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }
}

/// Ollama embedding client.
#[derive(Clone)]
pub struct OllamaEmbedder {
    /// HTTP client
    client: Client,

    /// Backend settings
    config: EmbeddingConfig,
}

impl OllamaEmbedder {
    /// Create a client with a 60 second request timeout.
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Check if the backend is reachable.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/version", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let payload = json!({
            "model": self.config.model,
            "prompt": text,
        });

        debug!("Generating embedding for text ({} chars)", text.len());

        let response = self
            .client
            .post(&format!("{}/api/embeddings", self.config.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to call embeddings API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Embeddings API error (status {}): {}", status, error_text);
        }

        #[derive(serde::Deserialize)]
        struct Response {
            embedding: Vec<f32>,
        }

        let response_data: Response = response
            .json()
            .await
            .context("Failed to parse embeddings response")?;

        Ok(response_data.embedding)
    }
}
