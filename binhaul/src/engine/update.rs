//! The update/diff engine.
//!
//! Per artifact the state machine is Resolve, Compare, then Skip or
//! Diverge. Comparing remote identities is one metadata call; downloading
//! is not, so an unchanged `remote_file` short-circuits before any
//! content fetch. The comparison ([`ArtifactDiff::changed`]) is the one
//! equality test shared by `status` and `update`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::install::{decoder, installer, LocalState};
use crate::manifest::{Artifact, Manifest, ManifestStore};
use crate::resolve::{matcher, Candidate};
use crate::source::{Resolved, Selection};

use super::expected_checksums;

/// Comparison of one stored artifact against freshly resolved state.
#[derive(Debug, Clone)]
pub struct ArtifactDiff {
    /// Index of the artifact in its manifest.
    pub index: usize,
    /// Remote identity recorded at the last reconciliation.
    pub stored_remote: String,
    /// Remote identity the source resolves to now.
    pub new_remote: String,
    /// The freshly resolved candidate.
    pub candidate: Candidate,
}

impl ArtifactDiff {
    /// The single change-detection test shared by status and update.
    pub fn changed(&self) -> bool {
        self.stored_remote != self.new_remote
    }
}

/// A remote identity change that was (or would be) acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactChange {
    pub old_remote: String,
    pub new_remote: String,
}

/// Result of a status pass over one package.
#[derive(Debug, Clone)]
pub struct PackageStatus {
    pub name: String,
    pub current_version: String,
    pub latest_version: String,
    pub changes: Vec<ArtifactChange>,
}

impl PackageStatus {
    pub fn update_available(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Result of an update pass over one package.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub name: String,
    pub from_version: String,
    pub to_version: String,
    /// Artifacts whose records were replaced.
    pub upgraded: Vec<ArtifactChange>,
}

impl UpdateReport {
    pub fn updated(&self) -> bool {
        !self.upgraded.is_empty()
    }
}

/// Match every stored artifact against the freshly resolved candidates.
///
/// Each artifact re-applies its stored `from_glob`. When several
/// artifacts share one glob (a multi-match install), they pair with the
/// glob's matches in order, reproducing the install-time pairing.
pub fn diff(manifest: &Manifest, resolved: &Resolved) -> Result<Vec<ArtifactDiff>> {
    let selection = manifest.source.selection();
    let mut taken: HashMap<&str, usize> = HashMap::new();
    let mut diffs = Vec::new();

    for (index, artifact) in manifest.artifacts.iter().enumerate() {
        let candidate = match selection {
            Selection::Sole => matcher::sole(&resolved.candidates, &artifact.from_glob)?,
            _ => {
                let matches = matcher::match_all(&resolved.candidates, &artifact.from_glob)?;
                let position = taken.entry(artifact.from_glob.as_str()).or_insert(0);
                let candidate = matches.get(*position).copied().ok_or_else(|| Error::NoMatch {
                    pattern: artifact.from_glob.clone(),
                })?;
                *position += 1;
                candidate
            }
        };

        diffs.push(ArtifactDiff {
            index,
            stored_remote: artifact.remote_file.clone(),
            new_remote: candidate.download_url.clone(),
            candidate: candidate.clone(),
        });
    }

    Ok(diffs)
}

/// Resolve and compare without fetching content or writing files.
pub fn status(client: &dyn HttpClient, manifest: &Manifest) -> Result<PackageStatus> {
    let resolved = manifest.source.resolve_latest(client)?;
    let diffs = diff(manifest, &resolved)?;

    Ok(PackageStatus {
        name: manifest.name.clone(),
        current_version: manifest.current_version.clone(),
        latest_version: resolved.version.clone(),
        changes: diffs
            .into_iter()
            .filter(ArtifactDiff::changed)
            .map(|d| ArtifactChange {
                old_remote: d.stored_remote,
                new_remote: d.new_remote,
            })
            .collect(),
    })
}

/// Bring a package up to date against its source.
///
/// Unchanged artifacts are skipped without any content fetch. Diverged
/// artifacts get fresh checksums, an idempotency check against the
/// existing local file (the file may have been updated by hand), and if
/// still unsatisfied, the full download/decode/install pipeline against
/// the same destination path as before. The manifest is persisted only
/// when at least one record was replaced; otherwise the on-disk file is
/// left untouched.
pub fn update(
    client: &dyn HttpClient,
    store: &ManifestStore,
    manifest: &mut Manifest,
) -> Result<UpdateReport> {
    let resolved = manifest.source.resolve_latest(client)?;
    let diffs = diff(manifest, &resolved)?;
    let from_version = manifest.current_version.clone();
    let mut upgraded = Vec::new();

    for d in diffs {
        if !d.changed() {
            tracing::debug!(remote = %d.stored_remote, "no update needed");
            continue;
        }

        let old = &manifest.artifacts[d.index];
        let Some(dest) = old.installed_destination().map(PathBuf::from) else {
            tracing::warn!(remote = %old.remote_file, "artifact was never installed; skipping");
            continue;
        };

        let checksums = expected_checksums(client, &resolved, &d.candidate)?;
        let mut artifact = Artifact {
            local_file: old.local_file.clone(),
            asset_url: d.candidate.asset_url.clone().unwrap_or_default(),
            remote_file: d.candidate.download_url.clone(),
            checksums,
            installed: old.installed,
            from_glob: old.from_glob.clone(),
            inner_artifacts: old.inner_artifacts.clone(),
        };

        match installer::verify_local_file(&dest, &artifact.checksums) {
            Ok(LocalState::Verified) => {
                // The local file was already brought up to date by hand;
                // the record catches up without a download.
                tracing::info!(path = %dest.display(), "local file already matches new checksums");
            }
            Ok(LocalState::Missing) | Err(Error::ChecksumMismatch { .. }) => {
                tracing::info!(url = %artifact.remote_file, path = %dest.display(), "updating");
                artifact.installed = false;
                for inner in &mut artifact.inner_artifacts {
                    inner.installed = false;
                }
                let bytes = client.get(&artifact.remote_file)?;
                decoder::unpack_and_install(&mut artifact, bytes, &dest)?;
            }
            Err(e) => return Err(e),
        }

        upgraded.push(ArtifactChange {
            old_remote: d.stored_remote,
            new_remote: d.new_remote,
        });
        manifest.artifacts[d.index] = artifact;
    }

    if !upgraded.is_empty() {
        manifest.current_version = resolved.version.clone();
        manifest.current_remote_url = resolved.remote_url.clone();
        manifest.latest_remote_url = resolved.latest_url.clone();
        if !resolved.checksum_file.is_empty() {
            manifest.checksum_file = resolved.checksum_file.clone();
        }
        store.save(manifest)?;
    }

    Ok(UpdateReport {
        name: manifest.name.clone(),
        from_version,
        to_version: resolved.version,
        upgraded,
    })
}
