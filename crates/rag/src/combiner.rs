//! The combined two-domain surface.

use binlore_core::{CombinedResult, Domain, DomainSelector, EntryDetails, QueryResult, Result};
use tracing::info;

use crate::KnowledgeBase;

/// Both domains behind one surface.
///
/// Combined queries run Windows first, then Unix, sequentially; either
/// domain failing fails the whole call. A domain that failed to load
/// never reaches this type, so a combiner implies both catalogs came up.
pub struct Combiner {
    windows: KnowledgeBase,
    unix: KnowledgeBase,
}

impl Combiner {
    /// Compose the two knowledge bases.
    pub fn new(windows: KnowledgeBase, unix: KnowledgeBase) -> Self {
        debug_assert_eq!(windows.domain(), Domain::Windows);
        debug_assert_eq!(unix.domain(), Domain::Unix);
        Self { windows, unix }
    }

    /// Build the selected indexes, Windows first.
    pub async fn build_indexes(&mut self, selector: DomainSelector) -> Result<()> {
        for domain in selector.domains() {
            match domain {
                Domain::Windows => self.windows.build_index().await?,
                Domain::Unix => self.unix.build_index().await?,
            }
        }
        Ok(())
    }

    /// Query both domains and merge under the fixed headers.
    pub async fn query(&self, text: &str) -> Result<CombinedResult> {
        info!("Combined query across both domains");
        let windows = self.windows.query(text).await?;
        let unix = self.unix.query(text).await?;
        Ok(CombinedResult::merge(windows, unix))
    }

    /// Query a single domain.
    pub async fn query_domain(&self, text: &str, domain: Domain) -> Result<QueryResult> {
        self.base(domain).query(text).await
    }

    /// Flat entry-name list for the selection; for `All`, Windows names
    /// come before Unix names.
    pub fn entry_names(&self, selector: DomainSelector) -> Vec<String> {
        let mut names = Vec::new();
        for domain in selector.domains() {
            names.extend(self.base(*domain).entry_names());
        }
        names
    }

    /// Case-insensitive entry lookup; for `All`, Windows is searched
    /// first and the first match wins.
    pub fn entry_details(&self, name: &str, selector: DomainSelector) -> Option<EntryDetails> {
        selector
            .domains()
            .iter()
            .find_map(|domain| self.base(*domain).entry_details(name))
    }

    /// One domain's knowledge base.
    pub fn base(&self, domain: Domain) -> &KnowledgeBase {
        match domain {
            Domain::Windows => &self.windows,
            Domain::Unix => &self.unix,
        }
    }
}
