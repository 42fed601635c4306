//! Raw LOLBAS records as published by the project feed.

use serde::{Deserialize, Serialize};

/// One LOLBAS entry: a Windows binary or script and its abuse commands.
///
/// The upstream feed carries more fields (paths, detections, resources);
/// only what the explorer surfaces is modeled here, and every field
/// defaults so partial records decode to empty text instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LolbasEntry {
    /// Binary or script name, e.g. `Certutil.exe`
    #[serde(default, rename = "Name")]
    pub name: String,
    /// What the binary is for
    #[serde(default, rename = "Description")]
    pub description: String,
    /// Documented abuse commands
    #[serde(default, rename = "Commands")]
    pub commands: Vec<LolbasCommand>,
}

/// One documented command under a LOLBAS entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LolbasCommand {
    /// The command line itself
    #[serde(default, rename = "Command")]
    pub command: String,
    /// What the command does
    #[serde(default, rename = "Description")]
    pub description: String,
    /// Abuse category, e.g. `Download`
    #[serde(default, rename = "Usecase")]
    pub usecase: String,
    /// MITRE ATT&CK technique id, e.g. `T1105`
    #[serde(default, rename = "MitreID")]
    pub mitre_id: String,
}
