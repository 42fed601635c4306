//! Retrieval units produced by the chunk builders.

use serde::{Deserialize, Serialize};

use crate::{ChunkId, Domain};

/// One retrieval-sized piece of a dataset: a single technique flattened
/// into a text blob, plus the metadata identifying where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk ID
    pub id: ChunkId,
    /// Owning dataset
    pub domain: Domain,
    /// Name of the entry this chunk was cut from
    pub entry: String,
    /// Usecase (Windows) or function category (Unix)
    pub label: String,
    /// The full text handed to the embedder and the generation prompt
    pub text: String,
}

impl Chunk {
    /// Create a chunk with a fresh id.
    pub fn new(domain: Domain, entry: &str, label: &str, text: String) -> Self {
        Self {
            id: ChunkId::new(),
            domain,
            entry: entry.to_string(),
            label: label.to_string(),
            text,
        }
    }
}

/// A chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity against the query (higher is more similar)
    pub score: f32,
}
