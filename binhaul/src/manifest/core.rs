//! The package manifest record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::artifact::Artifact;
use super::source::Source;

/// Persisted record of one package's resolved artifacts and version state.
///
/// A manifest is created once at first install, loaded from the store on
/// every `list`/`status`/`update` invocation, and rewritten in full
/// whenever any artifact changes. Identity (the [`Source`]) never mutates;
/// only the version, URL, and artifact fields do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Which source produced this package, with its typed identity.
    #[serde(flatten)]
    pub source: Source,

    /// Stable human-readable package identity, source-derived.
    pub name: String,

    /// Store filename this record was loaded from; retained so a later
    /// save overwrites the same file.
    #[serde(skip)]
    pub file_name: Option<String>,

    /// Last version successfully reconciled.
    #[serde(rename = "version", default)]
    pub current_version: String,

    /// Remote location the current version was resolved from.
    #[serde(rename = "remote_url", default)]
    pub current_remote_url: String,

    /// Location consulted to discover the latest version.
    #[serde(rename = "latest_url", default)]
    pub latest_remote_url: String,

    /// Checksum listing used for the most recent resolution; empty when
    /// the source embeds checksums directly.
    #[serde(default)]
    pub checksum_file: String,

    /// Resolved artifacts, in insertion order from the last resolution.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Manifest {
    /// Create an empty manifest for a source identity.
    pub fn new(source: Source, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            file_name: None,
            current_version: String::new(),
            current_remote_url: String::new(),
            latest_remote_url: String::new(),
            checksum_file: String::new(),
            artifacts: Vec::new(),
        }
    }

    /// The filename this manifest persists under: the one it was loaded
    /// from, or the name derived from its source identity.
    pub fn store_file_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| self.source.manifest_file_name())
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.current_version)
    }
}
