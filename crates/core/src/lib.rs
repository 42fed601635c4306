//! binlore core data models.
//!
//! This crate defines the shared types that flow between the corpus
//! layer (dataset acquisition and chunking) and the rag layer (indexing
//! and answering).

#![warn(missing_docs)]

// Core identities
mod id;

// Domains and retrieval units
mod chunk;
mod domain;

// Raw dataset records
mod gtfobins;
mod lolbas;

// Answer shapes
mod query;

// Configuration and errors
mod config;
mod error;

// Re-exports
pub use id::ChunkId;

// Domain & Chunk
pub use chunk::{Chunk, ScoredChunk};
pub use domain::{Domain, DomainSelector, SelectorParseError};

// Raw records
pub use gtfobins::{GtfoEntry, GtfoExample};
pub use lolbas::{LolbasCommand, LolbasEntry};

// Results
pub use query::{CombinedResult, EntryDetails, QueryResult};

// Configuration
pub use config::{EmbeddingConfig, GenerationConfig, RetrievalConfig, SourceConfig};

// Errors
pub use error::{Error, Result};
