//! Generative synthesis over retrieved chunks.

use std::sync::Arc;

use binlore_core::{Error, QueryResult, Result, ScoredChunk};
use tracing::debug;

use crate::Generator;

/// Builds the grounded prompt and runs the generation model.
#[derive(Clone)]
pub struct QueryEngine {
    generator: Arc<dyn Generator>,
}

impl QueryEngine {
    /// Create an engine over a generation capability.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Answer `question` from the retrieved chunks alone.
    ///
    /// The prompt carries only the chunk texts, never the full corpus.
    /// A backend failure maps to [`Error::GenerationUnavailable`]; there
    /// are no partial answers.
    pub async fn synthesize(
        &self,
        question: &str,
        retrieved: &[ScoredChunk],
    ) -> Result<QueryResult> {
        let prompt = build_prompt(question, retrieved);
        debug!(
            "Synthesizing answer from {} chunks ({} prompt chars)",
            retrieved.len(),
            prompt.len()
        );

        let answer = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| Error::GenerationUnavailable(e.to_string()))?;

        let sources = retrieved.iter().map(|s| s.chunk.text.clone()).collect();
        Ok(QueryResult { answer, sources })
    }
}

/// Numbered excerpt block, then the question.
fn build_prompt(question: &str, retrieved: &[ScoredChunk]) -> String {
    let mut excerpts = String::new();
    for (i, scored) in retrieved.iter().enumerate() {
        excerpts.push_str(&format!(
            "[{}] (score {:.2})\n{}\n\n",
            i + 1,
            scored.score,
            scored.chunk.text
        ));
    }

    format!(
        "You are a security research assistant. Answer the question using \
         only the documentation excerpts below.\n\n\
         Excerpts:\n{excerpts}Question: {question}\nAnswer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chunk, DeadGenerator, EchoGenerator};

    fn retrieved() -> Vec<ScoredChunk> {
        vec![
            ScoredChunk { chunk: chunk("Certutil.exe", "first excerpt"), score: 0.9 },
            ScoredChunk { chunk: chunk("Bitsadmin.exe", "second excerpt"), score: 0.5 },
        ]
    }

    #[tokio::test]
    async fn prompt_carries_only_the_retrieved_texts() {
        let engine = QueryEngine::new(Arc::new(EchoGenerator));
        let result = engine.synthesize("what downloads files?", &retrieved()).await.unwrap();

        assert!(result.answer.contains("[1] (score 0.90)\nfirst excerpt"));
        assert!(result.answer.contains("[2] (score 0.50)\nsecond excerpt"));
        assert!(result.answer.contains("Question: what downloads files?"));
        assert_eq!(result.sources, vec!["first excerpt", "second excerpt"]);
    }

    #[tokio::test]
    async fn dead_backend_means_no_answer_at_all() {
        let engine = QueryEngine::new(Arc::new(DeadGenerator));
        let err = engine.synthesize("anything", &retrieved()).await.unwrap_err();
        assert!(matches!(err, Error::GenerationUnavailable(_)));
    }
}
