//! Fresh-install pipeline, shared by all source kinds.

use crate::config;
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::install::{decoder, installer, LocalState};
use crate::manifest::{Artifact, Manifest, ManifestStore, Source};
use crate::resolve::{matcher, Candidate};
use crate::source::{ReleaseSpec, Selection};

use super::expected_checksums;

/// Resolve a source, select candidates, verify, install, and persist the
/// resulting manifest.
///
/// Per artifact the pipeline is: resolve expected digests, check the
/// destination for an already-satisfying file, and only then download and
/// run the archive decoder. A destination that exists but fails checksum
/// comparison is an error here; fresh installs never silently clobber.
///
/// `out_file` may be empty (destination defaults to the candidate's
/// filename under the local bin directory), relative, or absolute.
pub fn install(
    client: &dyn HttpClient,
    store: &ManifestStore,
    source: Source,
    release: &ReleaseSpec,
    file_glob: &str,
    out_file: &str,
) -> Result<Manifest> {
    let resolved = source.resolve(client, release)?;
    let selection = source.selection();

    let mut manifest = Manifest::new(source, resolved.name.clone());
    manifest.current_version = resolved.version.clone();
    manifest.current_remote_url = resolved.remote_url.clone();
    manifest.latest_remote_url = resolved.latest_url.clone();
    manifest.checksum_file = resolved.checksum_file.clone();

    let selected: Vec<Candidate> = match selection {
        Selection::First => vec![matcher::match_first(&resolved.candidates, file_glob)?.clone()],
        Selection::Every => matcher::match_all(&resolved.candidates, file_glob)?
            .into_iter()
            .cloned()
            .collect(),
        Selection::Sole => vec![matcher::sole(&resolved.candidates, file_glob)?.clone()],
    };

    for candidate in selected {
        let checksums = expected_checksums(client, &resolved, &candidate)?;
        let dest = config::resolve_out_file(out_file, &candidate.name)?;

        let mut artifact = Artifact {
            asset_url: candidate.asset_url.clone().unwrap_or_default(),
            remote_file: candidate.download_url.clone(),
            checksums,
            from_glob: file_glob.to_string(),
            ..Default::default()
        };

        match installer::verify_local_file(&dest, &artifact.checksums)? {
            LocalState::Verified => {
                tracing::info!(path = %dest.display(), "local file exists and matches checksum; nothing to do");
                artifact.local_file = dest.to_string_lossy().into_owned();
                artifact.installed = true;
            }
            LocalState::Missing => {
                tracing::info!(name = %candidate.name, url = %artifact.remote_file, "installing");
                let bytes = client.get(&artifact.remote_file)?;
                decoder::unpack_and_install(&mut artifact, bytes, &dest)?;
            }
        }

        manifest.artifacts.push(artifact);
    }

    store.save(&manifest)?;
    Ok(manifest)
}
