//! Dataset acquisition and chunking for binlore.
//!
//! This crate downloads the LOLBAS and GTFOBins feeds (with a local
//! cache fallback), decodes them into raw records, and flattens each
//! dataset into retrieval chunks behind the [`Catalog`] seam.

#![warn(missing_docs)]

pub mod catalog;
pub mod gtfobins;
pub mod lolbas;
pub mod source;

pub use catalog::Catalog;
pub use gtfobins::GtfobinsCatalog;
pub use lolbas::LolbasCatalog;
pub use source::{CacheStamp, DataSource};
