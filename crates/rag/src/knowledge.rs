//! One dataset wired end to end: catalog, index, engine.

use std::sync::Arc;

use binlore_core::{Domain, EntryDetails, Error, QueryResult, Result, RetrievalConfig};
use binlore_corpus::Catalog;
use tracing::{debug, info};

use crate::{DomainIndex, Embedder, QueryEngine};

/// A dataset made queryable.
///
/// Construction does not touch the network; [`Self::build_index`] does
/// the embedding work and must succeed before [`Self::query`] is
/// usable. Listing and detail lookup only need the catalog.
pub struct KnowledgeBase {
    catalog: Box<dyn Catalog>,
    embedder: Arc<dyn Embedder>,
    engine: QueryEngine,
    retrieval: RetrievalConfig,
    index: Option<DomainIndex>,
}

impl KnowledgeBase {
    /// Wire a catalog to the model capabilities.
    pub fn new(
        catalog: Box<dyn Catalog>,
        embedder: Arc<dyn Embedder>,
        engine: QueryEngine,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            catalog,
            embedder,
            engine,
            retrieval,
            index: None,
        }
    }

    /// Embed every chunk and build the in-memory index.
    ///
    /// Idempotent: a built index is never rebuilt within the process.
    pub async fn build_index(&mut self) -> Result<()> {
        if self.index.is_some() {
            debug!("{} index already built", self.domain());
            return Ok(());
        }

        let chunks = self.catalog.chunks()?;
        let index = DomainIndex::build(self.domain(), chunks, self.embedder.as_ref()).await?;
        self.index = Some(index);
        Ok(())
    }

    /// Embed the query, retrieve the top chunks, synthesize an answer.
    pub async fn query(&self, text: &str) -> Result<QueryResult> {
        let index = self.index.as_ref().ok_or(Error::IndexNotReady {
            domain: self.domain(),
        })?;

        let query_vec = self
            .embedder
            .embed(text)
            .await
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        let retrieved = index.retrieve(&query_vec, self.retrieval.top_k);
        info!("{}: retrieved {} chunks for query", self.domain(), retrieved.len());

        self.engine.synthesize(text, &retrieved).await
    }

    /// Every entry name in the catalog.
    pub fn entry_names(&self) -> Vec<String> {
        self.catalog.entry_names()
    }

    /// Case-insensitive entry lookup.
    pub fn entry_details(&self, name: &str) -> Option<EntryDetails> {
        self.catalog.entry_details(name)
    }

    /// Which dataset this knowledge base serves.
    pub fn domain(&self) -> Domain {
        self.catalog.domain()
    }

    /// Chunk count once the index is built, `None` before.
    pub fn chunk_count(&self) -> Option<usize> {
        self.index.as_ref().map(|i| i.len())
    }
}
