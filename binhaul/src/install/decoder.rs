//! Cascading archive decoder.
//!
//! Takes downloaded bytes, verifies them against the artifact's expected
//! digests, then unwraps compression layers until an installable
//! executable is reached. Tar containers are scanned member by member:
//! the first matching member that sniffs as an executable is installed
//! and recorded as an [`InnerArtifact`]; matching non-executable members
//! are noted and scanning continues, which lets an archive carry one real
//! binary among non-matching noise.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use glob::Pattern;

use crate::error::{Error, Result};
use crate::manifest::{Artifact, InnerArtifact};
use crate::resolve::shasums;

use super::installer;
use super::sniff::{sniff, ContentKind};

/// Hard cap on unwrap iterations, so a pathological nested archive cannot
/// loop unboundedly.
pub const MAX_LAYERS: usize = 8;

/// Verify, unwrap, and install a downloaded artifact.
///
/// Expected digests are checked against the outer bytes before any
/// decompression work is spent on them. Tar members are selected by glob:
/// the destination's file name is the pattern, so an exact basename is
/// the literal-glob special case, and the pattern matches either the
/// member's full path or its basename.
///
/// On success the artifact record reflects what was written: either the
/// artifact itself (`installed`, `local_file`) or exactly one of its
/// inner artifacts.
pub fn unpack_and_install(artifact: &mut Artifact, bytes: Vec<u8>, dest: &Path) -> Result<()> {
    shasums::verify_all(&bytes, &artifact.checksums)?;

    let member_pattern = dest
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let mut bytes = bytes;
    for _ in 0..MAX_LAYERS {
        let kind = sniff(&bytes);
        tracing::debug!(kind = kind.name(), size = bytes.len(), "sniffed content");
        match kind {
            ContentKind::Gzip => {
                bytes = decompress_gzip(&bytes)?;
            }
            ContentKind::Bzip2 => {
                bytes = decompress_bzip2(&bytes)?;
            }
            ContentKind::Tar => {
                return install_from_tar(artifact, &bytes, dest, &member_pattern);
            }
            kind if kind.is_installable() => {
                installer::install_binary(&bytes, dest)?;
                artifact.local_file = dest.to_string_lossy().into_owned();
                artifact.installed = true;
                return Ok(());
            }
            kind => {
                return Err(Error::UnsupportedContent { kind: kind.name() });
            }
        }
    }
    Err(Error::TooManyLayers { limit: MAX_LAYERS })
}

fn decompress_gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| Error::Decode {
            reason: format!("gzip: {}", e),
        })?;
    Ok(out)
}

fn decompress_bzip2(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    bzip2::read::BzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| Error::Decode {
            reason: format!("bzip2: {}", e),
        })?;
    Ok(out)
}

/// Scan a tar archive for the first matching executable member.
///
/// One InnerArtifact record per destination: a record left by a previous
/// resolution of the same destination is refreshed in place rather than
/// duplicated.
fn install_from_tar(
    artifact: &mut Artifact,
    bytes: &[u8],
    dest: &Path,
    pattern_str: &str,
) -> Result<()> {
    let pattern = Pattern::new(pattern_str).map_err(|e| Error::InvalidPattern {
        pattern: pattern_str.to_string(),
        source: e,
    })?;
    let local_file = dest.to_string_lossy().into_owned();

    let mut record_index = artifact
        .inner_artifacts
        .iter()
        .position(|ia| ia.local_file == local_file);

    let mut archive = tar::Archive::new(bytes);
    let entries = archive.entries().map_err(|e| Error::Decode {
        reason: format!("tar: {}", e),
    })?;

    for entry in entries {
        let mut entry = entry.map_err(|e| Error::Decode {
            reason: format!("tar: {}", e),
        })?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let member_path = entry
            .path()
            .map_err(|e| Error::Decode {
                reason: format!("tar: {}", e),
            })?
            .to_string_lossy()
            .into_owned();
        if !member_matches(&pattern, &member_path) {
            continue;
        }

        let mut content = Vec::new();
        entry.read_to_end(&mut content).map_err(|e| Error::Decode {
            reason: format!("tar: {}", e),
        })?;

        let index = match record_index {
            Some(i) => i,
            None => {
                artifact.inner_artifacts.push(InnerArtifact::default());
                let i = artifact.inner_artifacts.len() - 1;
                record_index = Some(i);
                i
            }
        };
        let inner = &mut artifact.inner_artifacts[index];
        inner.source_path = member_path.clone();
        inner.from_glob = pattern_str.to_string();
        // Computed locally for record-keeping and future change detection,
        // not security verification.
        inner.checksums = vec![shasums::compute(&content)];

        let kind = sniff(&content);
        tracing::debug!(member = %member_path, kind = kind.name(), "inspected archive member");
        if kind == ContentKind::Executable {
            installer::install_binary(&content, dest)?;
            let inner = &mut artifact.inner_artifacts[index];
            inner.local_file = local_file;
            inner.installed = true;
            return Ok(());
        }
    }

    Err(Error::NoMatchInArchive {
        pattern: pattern_str.to_string(),
    })
}

fn member_matches(pattern: &Pattern, member_path: &str) -> bool {
    if pattern.matches(member_path) {
        return true;
    }
    Path::new(member_path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|base| pattern.matches(base))
        .unwrap_or(false)
}
