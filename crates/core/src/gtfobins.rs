//! Raw GTFOBins records as published by the project feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One GTFOBins binary: its function categories and their examples.
///
/// The feed is a JSON object keyed by binary name; the map type keeps
/// traversal order deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GtfoEntry {
    /// What the binary is for (often absent upstream)
    #[serde(default)]
    pub description: String,
    /// Function category (`shell`, `file-download`, `suid`, ...) to examples
    #[serde(default)]
    pub functions: BTreeMap<String, Vec<GtfoExample>>,
}

/// One worked example under a GTFOBins function category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GtfoExample {
    /// What the example achieves (absent upstream becomes empty)
    #[serde(default)]
    pub description: String,
    /// The shell commands
    #[serde(default)]
    pub code: String,
}
