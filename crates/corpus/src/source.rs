//! Feed acquisition with a cache fallback.
//!
//! One attempt per strategy: GET the feed URL; if the body is valid
//! JSON, overwrite the cache with it verbatim. On any fetch or parse
//! failure, fall back to the cache file. Both failing is fatal for the
//! domain. No retries, no integrity checks, no expiry.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use binlore_core::{Error, Result};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info, warn};

/// Provenance stamp written next to each cache file.
///
/// Write-only metadata: surfaced in logs when falling back to the
/// cache, never used to validate or expire it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStamp {
    /// Feed URL the cache was fetched from
    pub url: String,
    /// When the cache was written
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Downloads dataset feeds, keeping a verbatim file cache as fallback.
#[derive(Clone)]
pub struct DataSource {
    /// HTTP client
    client: Client,
}

impl DataSource {
    /// Create a data source with a 30 second request timeout.
    pub fn new() -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch a JSON feed, falling back to `cache_path` when the network
    /// or the response body lets us down.
    pub async fn fetch_json(&self, url: &str, cache_path: &Path) -> Result<Value> {
        match self.fetch_fresh(url).await {
            Ok((body, value)) => {
                self.write_cache(url, cache_path, &body).await;
                Ok(value)
            }
            Err(reason) => {
                warn!(
                    "Fetching {} failed ({}), trying cache {}",
                    url,
                    reason,
                    cache_path.display()
                );
                match self.read_cache(cache_path).await {
                    Some(value) => Ok(value),
                    None => Err(Error::DataUnavailable {
                        url: url.to_string(),
                        cache: cache_path.to_path_buf(),
                    }),
                }
            }
        }
    }

    /// Single GET attempt. Non-2xx status or a non-JSON body counts as a
    /// failure.
    async fn fetch_fresh(&self, url: &str) -> std::result::Result<(String, Value), String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request error: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status {status}"));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("body error: {e}"))?;

        let value: Value =
            serde_json::from_str(&body).map_err(|e| format!("invalid JSON: {e}"))?;

        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok((body, value))
    }

    /// Overwrite the cache with the fetched body, verbatim. Best-effort:
    /// a failed write is logged and swallowed.
    async fn write_cache(&self, url: &str, cache_path: &Path, body: &str) {
        if let Some(parent) = cache_path.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                warn!("Could not create cache dir {}: {}", parent.display(), e);
                return;
            }
        }

        if let Err(e) = fs::write(cache_path, body).await {
            warn!("Could not write cache {}: {}", cache_path.display(), e);
            return;
        }

        let stamp = CacheStamp {
            url: url.to_string(),
            fetched_at: chrono::Utc::now(),
        };
        let stamp_path = stamp_path(cache_path);
        match serde_json::to_string_pretty(&stamp) {
            Ok(json) => {
                if let Err(e) = fs::write(&stamp_path, json.as_bytes()).await {
                    warn!("Could not write cache stamp {}: {}", stamp_path.display(), e);
                }
            }
            Err(e) => warn!("Could not serialize cache stamp: {}", e),
        }

        info!("Cached {} at {}", url, cache_path.display());
    }

    /// Read and parse the cache. `None` covers a missing file, an
    /// unreadable file and a file that is not JSON.
    async fn read_cache(&self, cache_path: &Path) -> Option<Value> {
        let json = match fs::read_to_string(cache_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache at {}", cache_path.display());
                return None;
            }
            Err(e) => {
                warn!("Could not read cache {}: {}", cache_path.display(), e);
                return None;
            }
        };

        let value: Value = match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache {} is not valid JSON: {}", cache_path.display(), e);
                return None;
            }
        };

        match self.read_stamp(cache_path).await {
            Some(stamp) => info!(
                "Serving {} from cache fetched at {}",
                cache_path.display(),
                stamp.fetched_at
            ),
            None => info!("Serving {} from cache", cache_path.display()),
        }

        Some(value)
    }

    async fn read_stamp(&self, cache_path: &Path) -> Option<CacheStamp> {
        let json = fs::read_to_string(stamp_path(cache_path)).await.ok()?;
        serde_json::from_str(&json).ok()
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::new()
    }
}

/// The stamp sits next to the cache: `lolbas.json` -> `lolbas.meta.json`.
fn stamp_path(cache_path: &Path) -> PathBuf {
    let stem = cache_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("cache");
    cache_path.with_file_name(format!("{stem}.meta.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so every fetch fails fast.
    const DEAD_URL: &str = "http://127.0.0.1:9/feed.json";

    #[tokio::test]
    async fn falls_back_to_cache_when_fetch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("lolbas.json");
        fs::write(&cache, r#"[{"Name": "Certutil.exe"}]"#).await.unwrap();

        let source = DataSource::new();
        let value = source.fetch_json(DEAD_URL, &cache).await.unwrap();
        assert_eq!(value[0]["Name"], "Certutil.exe");
    }

    #[tokio::test]
    async fn fails_when_fetch_and_cache_are_both_gone() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("missing.json");

        let source = DataSource::new();
        let err = source.fetch_json(DEAD_URL, &cache).await.unwrap_err();
        assert!(matches!(err, Error::DataUnavailable { .. }));

        let message = err.to_string();
        assert!(message.contains(DEAD_URL));
        assert!(message.contains("missing.json"));
    }

    #[tokio::test]
    async fn corrupt_cache_counts_as_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("gtfobins.json");
        fs::write(&cache, "not json").await.unwrap();

        let source = DataSource::new();
        let err = source.fetch_json(DEAD_URL, &cache).await.unwrap_err();
        assert!(matches!(err, Error::DataUnavailable { .. }));
    }

    #[test]
    fn stamp_path_keeps_the_cache_directory() {
        let path = stamp_path(Path::new("/tmp/data/lolbas.json"));
        assert_eq!(path, Path::new("/tmp/data/lolbas.meta.json"));
    }
}
