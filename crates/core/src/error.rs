//! The error taxonomy shared across the workspace.

use std::path::PathBuf;

use crate::Domain;

/// Result alias used throughout binlore.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between acquisition and answering.
///
/// Construction-time variants (`DataUnavailable`, `Decode`, `EmptyDataset`,
/// `EmbeddingUnavailable`) abort startup for the affected domain; the
/// combined surface refuses to exist unless both domains came up.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The feed could not be fetched and the cache was unusable.
    #[error("data unavailable: fetching {url} failed and no usable cache at {}", .cache.display())]
    DataUnavailable {
        /// Upstream URL that could not be fetched
        url: String,
        /// Cache path that could not be read
        cache: PathBuf,
    },

    /// The document parsed as JSON but not into the domain's shape.
    #[error("{domain} dataset does not match the expected shape")]
    Decode {
        /// Affected domain
        domain: Domain,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A dataset produced no indexable chunks.
    #[error("{domain} dataset is empty: nothing to index")]
    EmptyDataset {
        /// Affected domain
        domain: Domain,
    },

    /// The index was queried before it was built. A programming error.
    #[error("{domain} index was queried before it was built")]
    IndexNotReady {
        /// Affected domain
        domain: Domain,
    },

    /// The embedding backend failed or is unreachable.
    #[error("embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// The generation backend failed or is unreachable.
    #[error("generation backend unavailable: {0}")]
    GenerationUnavailable(String),
}
