//! Domain tags for the two knowledge sources.

use serde::{Deserialize, Serialize};

/// Which dataset an entry or chunk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// LOLBAS: Windows living-off-the-land binaries
    Windows,
    /// GTFOBins: abusable Unix binaries
    Unix,
}

impl Domain {
    /// The dataset banner used in chunk texts and section headers.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Windows => "LOLBAS (Windows)",
            Domain::Unix => "GTFOBins (Unix/Linux)",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Windows => write!(f, "windows"),
            Domain::Unix => write!(f, "unix"),
        }
    }
}

/// Which domains an operation should touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainSelector {
    /// Both domains, Windows first.
    #[default]
    All,
    /// LOLBAS only.
    Windows,
    /// GTFOBins only.
    Unix,
}

impl DomainSelector {
    /// The domains this selector names, in query order.
    pub fn domains(&self) -> &'static [Domain] {
        match self {
            DomainSelector::All => &[Domain::Windows, Domain::Unix],
            DomainSelector::Windows => &[Domain::Windows],
            DomainSelector::Unix => &[Domain::Unix],
        }
    }
}

impl std::str::FromStr for DomainSelector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "both" => Ok(DomainSelector::All),
            "windows" | "lolbas" => Ok(DomainSelector::Windows),
            "unix" | "linux" | "gtfobins" => Ok(DomainSelector::Unix),
            other => Err(SelectorParseError(other.to_string())),
        }
    }
}

/// Error for an unrecognized domain selector string.
#[derive(Debug, thiserror::Error)]
#[error("unknown domain selector '{0}' (expected all, windows or unix)")]
pub struct SelectorParseError(
    /// The rejected input.
    pub String,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_accepts_dataset_aliases() {
        assert_eq!("LOLBAS".parse::<DomainSelector>().unwrap(), DomainSelector::Windows);
        assert_eq!("gtfobins".parse::<DomainSelector>().unwrap(), DomainSelector::Unix);
        assert_eq!("Both".parse::<DomainSelector>().unwrap(), DomainSelector::All);
        assert!("macos".parse::<DomainSelector>().is_err());
    }

    #[test]
    fn all_selector_puts_windows_first() {
        assert_eq!(DomainSelector::All.domains(), &[Domain::Windows, Domain::Unix]);
    }
}
