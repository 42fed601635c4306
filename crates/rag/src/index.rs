//! In-memory vector index over one domain's chunks.

use binlore_core::{Chunk, Domain, Error, Result, ScoredChunk};
use tracing::{debug, info};

use crate::Embedder;

/// Chunks and their embeddings, immutable once built.
#[derive(Debug)]
pub struct DomainIndex {
    domain: Domain,
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
}

impl DomainIndex {
    /// Embed every chunk and build the index.
    ///
    /// Fails with [`Error::EmptyDataset`] when there is nothing to index
    /// and [`Error::EmbeddingUnavailable`] when the backend cannot
    /// embed; a half-embedded index is never returned.
    pub async fn build(
        domain: Domain,
        chunks: Vec<Chunk>,
        embedder: &dyn Embedder,
    ) -> Result<Self> {
        if chunks.is_empty() {
            return Err(Error::EmptyDataset { domain });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder
            .embed_batch(&texts)
            .await
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);
        info!(
            "Built {} index: {} chunks, dimension {}",
            domain,
            chunks.len(),
            dimension
        );

        Ok(Self {
            domain,
            chunks,
            vectors,
        })
    }

    /// Rank every chunk against the query vector and keep the best `k`.
    pub fn retrieve(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(self.vectors.iter())
            .map(|(chunk, vector)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query, vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(
            "Retrieved {} of {} {} chunks",
            scored.len(),
            self.chunks.len(),
            self.domain
        );
        scored
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when nothing is indexed (never after a successful build).
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Cosine similarity with zero-norm and length-mismatch guards.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chunk, KeywordEmbedder};

    #[test]
    fn cosine_basics() {
        let a = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);

        let x = vec![1.0, 0.0];
        let y = vec![0.0, 1.0];
        assert!(cosine_similarity(&x, &y).abs() < 1e-6);

        assert_eq!(cosine_similarity(&[], &a), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn empty_chunk_list_fails_construction() {
        let embedder = KeywordEmbedder::new();
        let err = DomainIndex::build(Domain::Windows, Vec::new(), &embedder)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyDataset { domain: Domain::Windows }));
    }

    #[tokio::test]
    async fn retrieval_ranks_by_similarity_and_truncates() {
        let embedder = KeywordEmbedder::new();
        let chunks = vec![
            chunk("Certutil.exe", "download a file from the internet"),
            chunk("Reg.exe", "modify the registry"),
            chunk("Bitsadmin.exe", "download jobs in the background"),
        ];
        let index = DomainIndex::build(Domain::Windows, chunks, &embedder)
            .await
            .unwrap();

        let query = embedder.vector("how to download something");
        let hits = index.retrieve(&query, 2);

        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
        assert!(hits.iter().all(|h| h.chunk.text.contains("download")));

        let all = index.retrieve(&query, 10);
        assert_eq!(all.len(), 3);
    }
}
