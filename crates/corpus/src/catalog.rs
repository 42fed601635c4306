//! The seam between the two datasets and the retrieval layer.

use binlore_core::{Chunk, Domain, EntryDetails, Result};

/// A loaded dataset: entry listing, detail lookup, chunk production.
///
/// Two implementations exist, one per dataset shape. Everything past
/// this seam (indexing, retrieval, synthesis) is domain-agnostic.
pub trait Catalog: Send + Sync {
    /// Which dataset this catalog holds.
    fn domain(&self) -> Domain;

    /// Every entry name, in document order.
    fn entry_names(&self) -> Vec<String>;

    /// Exact case-insensitive lookup; first match wins.
    fn entry_details(&self, name: &str) -> Option<EntryDetails>;

    /// Flatten the dataset into retrieval chunks.
    ///
    /// Fails with [`binlore_core::Error::EmptyDataset`] when the dataset
    /// holds no entries at all. Entries that produce no chunks of their
    /// own are dropped silently.
    fn chunks(&self) -> Result<Vec<Chunk>>;
}
