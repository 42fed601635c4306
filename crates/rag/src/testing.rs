//! Deterministic stand-ins for the model backends, test-only.

use anyhow::Result;
use async_trait::async_trait;
use binlore_core::{Chunk, Domain};

use crate::{Embedder, Generator};

/// Counts a fixed vocabulary; texts sharing words land near each other.
pub struct KeywordEmbedder {
    vocabulary: Vec<&'static str>,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            vocabulary: vec!["download", "upload", "shell", "registry", "certutil", "vim"],
        }
    }

    /// The embedding itself, synchronously, for building query vectors.
    pub fn vector(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vector(text))
    }
}

/// Always fails, to exercise construction-time error paths.
pub struct DeadEmbedder;

#[async_trait]
impl Embedder for DeadEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        anyhow::bail!("connection refused")
    }
}

/// Returns the prompt itself so tests can inspect what the engine built.
pub struct EchoGenerator;

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(prompt.to_string())
    }
}

/// Returns a fixed answer.
pub struct CannedGenerator(pub &'static str);

#[async_trait]
impl Generator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Always fails, to exercise the no-partial-answers path.
pub struct DeadGenerator;

#[async_trait]
impl Generator for DeadGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("connection refused")
    }
}

/// A Windows chunk with the given entry name and text.
pub fn chunk(entry: &str, text: &str) -> Chunk {
    Chunk::new(Domain::Windows, entry, "Test", text.to_string())
}
