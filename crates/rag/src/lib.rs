//! Retrieval and answering for binlore.
//!
//! Embeds dataset chunks into an in-memory vector index, retrieves the
//! closest chunks for a query, and synthesizes answers with an external
//! generation model. The combiner composes the two domains behind one
//! surface.

#![warn(missing_docs)]

pub mod combiner;
pub mod embed;
pub mod engine;
pub mod generate;
pub mod index;
pub mod knowledge;

#[cfg(test)]
pub(crate) mod testing;

pub use combiner::Combiner;
pub use embed::{Embedder, OllamaEmbedder};
pub use engine::QueryEngine;
pub use generate::{Generator, OllamaGenerator};
pub use index::DomainIndex;
pub use knowledge::KnowledgeBase;
