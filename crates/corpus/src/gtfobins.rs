//! The GTFOBins catalog: abusable Unix binaries.

use std::collections::BTreeMap;
use std::path::Path;

use binlore_core::{Chunk, Domain, EntryDetails, Error, GtfoEntry, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::{Catalog, DataSource};

/// The decoded GTFOBins feed, a map from binary name to its record.
#[derive(Debug)]
pub struct GtfobinsCatalog {
    entries: BTreeMap<String, GtfoEntry>,
}

impl GtfobinsCatalog {
    /// Decode a fetched feed document.
    pub fn from_value(value: Value) -> Result<Self> {
        let entries: BTreeMap<String, GtfoEntry> =
            serde_json::from_value(value).map_err(|source| Error::Decode {
                domain: Domain::Unix,
                source,
            })?;
        debug!("Decoded {} GTFOBins binaries", entries.len());
        Ok(Self { entries })
    }

    /// Fetch the feed (or fall back to its cache) and decode it.
    pub async fn load(source: &DataSource, url: &str, cache_path: &Path) -> Result<Self> {
        let value = source.fetch_json(url, cache_path).await?;
        let catalog = Self::from_value(value)?;
        info!("Loaded GTFOBins catalog: {} binaries", catalog.len());
        Ok(catalog)
    }

    /// Number of binaries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the feed decoded to nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Function-category names documented for one binary, empty when the
    /// binary is unknown. Lookup ignores case like `entry_details`.
    pub fn function_names(&self, binary: &str) -> Vec<String> {
        self.lookup(binary)
            .map(|(_, entry)| entry.functions.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn lookup(&self, name: &str) -> Option<(&String, &GtfoEntry)> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
    }
}

impl Catalog for GtfobinsCatalog {
    fn domain(&self) -> Domain {
        Domain::Unix
    }

    fn entry_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn entry_details(&self, name: &str) -> Option<EntryDetails> {
        self.lookup(name).map(|(key, entry)| EntryDetails::Unix {
            name: key.clone(),
            entry: entry.clone(),
        })
    }

    fn chunks(&self) -> Result<Vec<Chunk>> {
        if self.entries.is_empty() {
            return Err(Error::EmptyDataset {
                domain: Domain::Unix,
            });
        }

        let mut chunks = Vec::new();
        for (binary, entry) in &self.entries {
            // One chunk per worked example; binaries without functions
            // contribute nothing.
            for (function, examples) in &entry.functions {
                for example in examples {
                    let text = format!(
                        "Source: GTFOBins (Unix/Linux)\n\
                         Binary: {}\n\
                         Function: {}\n\
                         Description: {}\n\
                         Code Sample: {}",
                        binary, function, example.description, example.code,
                    );
                    chunks.push(Chunk::new(Domain::Unix, binary, function, text));
                }
            }
        }

        debug!(
            "Built {} chunks from {} GTFOBins binaries",
            chunks.len(),
            self.entries.len()
        );
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_feed() -> Value {
        json!({
            "vim": {
                "functions": {
                    "shell": [
                        { "description": "Spawn an interactive shell", "code": "vim -c ':!/bin/sh'" },
                        { "code": "vim -c ':shell'" }
                    ],
                    "file-read": [
                        { "code": "vim file_to_read" }
                    ],
                    "limited-suid": []
                }
            },
            "watch": {
                "functions": {}
            }
        })
    }

    #[test]
    fn one_chunk_per_binary_function_example_triple() {
        let catalog = GtfobinsCatalog::from_value(sample_feed()).unwrap();
        let chunks = catalog.chunks().unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.domain == Domain::Unix));
        assert!(chunks.iter().all(|c| c.entry == "vim"));
    }

    #[test]
    fn empty_function_category_contributes_no_chunks() {
        let catalog = GtfobinsCatalog::from_value(sample_feed()).unwrap();
        let chunks = catalog.chunks().unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.label != "limited-suid"));
    }

    #[test]
    fn absent_description_becomes_empty_text() {
        let catalog = GtfobinsCatalog::from_value(sample_feed()).unwrap();
        let chunks = catalog.chunks().unwrap();

        let bare = chunks
            .iter()
            .find(|c| c.text.contains("vim -c ':shell'"))
            .unwrap();
        assert!(bare.text.contains("Description: \nCode Sample:"));
    }

    #[test]
    fn empty_feed_is_a_hard_error() {
        let catalog = GtfobinsCatalog::from_value(json!({})).unwrap();
        assert!(matches!(
            catalog.chunks(),
            Err(Error::EmptyDataset { domain: Domain::Unix })
        ));
    }

    #[test]
    fn function_names_ignore_case_and_unknown_binaries() {
        let catalog = GtfobinsCatalog::from_value(sample_feed()).unwrap();

        assert_eq!(
            catalog.function_names("VIM"),
            vec!["file-read", "limited-suid", "shell"]
        );
        assert!(catalog.function_names("nc").is_empty());
    }

    #[test]
    fn details_keep_the_original_key_casing() {
        let catalog = GtfobinsCatalog::from_value(sample_feed()).unwrap();

        let details = catalog.entry_details("Vim").unwrap();
        assert_eq!(details.name(), "vim");
        match details {
            EntryDetails::Unix { entry, .. } => {
                assert_eq!(entry.functions.len(), 3);
            }
            EntryDetails::Windows(_) => panic!("wrong domain"),
        }
    }
}
