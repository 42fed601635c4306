//! Construction-time configuration.
//!
//! Every component takes its configuration as an explicit value passed
//! into its constructor; nothing reads process-global state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the two dataset feeds live and where their caches go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// LOLBAS feed URL
    #[serde(default = "default_lolbas_url")]
    pub lolbas_url: String,
    /// GTFOBins feed URL
    #[serde(default = "default_gtfobins_url")]
    pub gtfobins_url: String,
    /// Directory holding the cache files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl SourceConfig {
    /// Cache file for the LOLBAS feed.
    pub fn lolbas_cache(&self) -> PathBuf {
        self.data_dir.join("lolbas.json")
    }

    /// Cache file for the GTFOBins feed.
    pub fn gtfobins_cache(&self) -> PathBuf {
        self.data_dir.join("gtfobins.json")
    }
}

fn default_lolbas_url() -> String {
    "https://lolbas-project.github.io/api/lolbas.json".to_string()
}

fn default_gtfobins_url() -> String {
    "https://gtfobins.github.io/gtfobins.json".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".binlore")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            lolbas_url: default_lolbas_url(),
            gtfobins_url: default_gtfobins_url(),
            data_dir: default_data_dir(),
        }
    }
}

/// Embedding backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama-compatible server URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Embedding model name
    #[serde(default = "default_embed_model")]
    pub model: String,
    /// Embedding dimension (informational, shown by the status overview)
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embed_model() -> String {
    "qwen3-embedding:0.6b".to_string()
}

fn default_dimension() -> usize {
    1024 // Qwen3-Embedding-0.6B dimension
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_embed_model(),
            dimension: default_dimension(),
        }
    }
}

/// Generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Ollama-compatible server URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Generation model name
    #[serde(default = "default_gen_model")]
    pub model: String,
}

fn default_gen_model() -> String {
    "qwen3:4b".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_gen_model(),
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// How many chunks are handed to the generation model per query.
    /// Defaults to 4.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    4
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: default_top_k() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: SourceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.lolbas_url, "https://lolbas-project.github.io/api/lolbas.json");
        assert_eq!(config.lolbas_cache(), PathBuf::from(".binlore/lolbas.json"));

        let retrieval: RetrievalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(retrieval.top_k, 4);
    }
}
