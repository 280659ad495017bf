//! Artifact records tracked by a package manifest.

use serde::{Deserialize, Serialize};

/// One top-level downloaded file tracked by a manifest.
///
/// `remote_file` is the field compared for change detection on update;
/// `from_glob` is retained so a future resolution re-applies the identical
/// selection rule. `checksums` holds every expected digest collected from
/// the source's checksum listings, and all of them must verify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Destination path when this artifact itself was installed directly.
    #[serde(default)]
    pub local_file: String,

    /// API identity of the resolved asset, when the source has one.
    #[serde(rename = "asset", default)]
    pub asset_url: String,

    /// Download URL of the currently-resolved remote file.
    pub remote_file: String,

    /// Expected digests; every entry must verify against the download.
    #[serde(default)]
    pub checksums: Vec<String>,

    /// Whether this artifact (as opposed to an inner member) was installed.
    #[serde(default)]
    pub installed: bool,

    /// Pattern that selected this artifact from the candidate list.
    #[serde(default)]
    pub from_glob: String,

    /// Members extracted from inside this artifact's archive, if any.
    #[serde(default)]
    pub inner_artifacts: Vec<InnerArtifact>,
}

impl Artifact {
    /// The destination path that was actually written for this artifact,
    /// whether the artifact installed directly or through an inner member.
    pub fn installed_destination(&self) -> Option<&str> {
        if self.installed && !self.local_file.is_empty() {
            return Some(&self.local_file);
        }
        self.inner_artifacts
            .iter()
            .find(|ia| ia.installed && !ia.local_file.is_empty())
            .map(|ia| ia.local_file.as_str())
    }
}

/// One file extracted from inside an [`Artifact`]'s archive.
///
/// Inner checksums are computed locally for record-keeping and future
/// change detection; they are not externally supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerArtifact {
    /// Pattern that selected this member inside the archive.
    #[serde(default)]
    pub from_glob: String,

    /// Digest of the extracted member content.
    #[serde(default)]
    pub checksums: Vec<String>,

    /// Whether this member was the file written to disk.
    #[serde(default)]
    pub installed: bool,

    /// Path of the member inside the archive.
    #[serde(rename = "source", default)]
    pub source_path: String,

    /// Destination path this member was installed to.
    #[serde(default)]
    pub local_file: String,
}
