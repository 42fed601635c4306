//! Answer shapes returned by the query surface.

use serde::{Deserialize, Serialize};

use crate::{GtfoEntry, LolbasEntry};

/// A synthesized answer from one domain plus its evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The generated answer
    pub answer: String,
    /// Exact chunk texts given to the generation model, in rank order
    pub sources: Vec<String>,
}

/// The two-domain answer produced by the combiner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Both answers under their dataset headers, Windows first
    pub answer: String,
    /// Windows sources followed by Unix sources
    pub sources: Vec<String>,
}

impl CombinedResult {
    /// Merge two per-domain results into the fixed combined format.
    pub fn merge(windows: QueryResult, unix: QueryResult) -> Self {
        let answer = format!(
            "Results from Windows (LOLBAS):\n{}\n\nResults from Unix/Linux (GTFOBins):\n{}",
            windows.answer, unix.answer
        );
        let mut sources = windows.sources;
        sources.extend(unix.sources);
        Self { answer, sources }
    }
}

/// Full record behind one entry name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntryDetails {
    /// A LOLBAS entry
    Windows(LolbasEntry),
    /// A GTFOBins binary and its record
    Unix {
        /// Binary name (the map key upstream)
        name: String,
        /// The record itself
        entry: GtfoEntry,
    },
}

impl EntryDetails {
    /// Name of the entry, whichever domain it came from.
    pub fn name(&self) -> &str {
        match self {
            EntryDetails::Windows(entry) => &entry.name,
            EntryDetails::Unix { name, .. } => name,
        }
    }
}
