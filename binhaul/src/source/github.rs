//! GitHub release source adapter.
//!
//! Resolves a repository's latest (or pinned) release through the REST
//! API and offers its assets as candidates. Assets whose names look like
//! checksum listings become the checksum sources for the release.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::resolve::Candidate;

use super::{ReleaseSpec, Resolved};

const API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    url: String,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    url: String,
    browser_download_url: String,
}

pub(super) fn resolve(
    client: &dyn HttpClient,
    owner: &str,
    repo: &str,
    spec: &ReleaseSpec,
) -> Result<Resolved> {
    let api_url = release_url(owner, repo, spec);
    let bytes = client.get(&api_url)?;
    let release: Release = serde_json::from_slice(&bytes).map_err(|e| Error::Fetch {
        url: api_url.clone(),
        reason: format!("invalid release response: {}", e),
    })?;
    tracing::debug!(owner, repo, tag = %release.tag_name, "resolved github release");

    let checksum_files: Vec<String> = release
        .assets
        .iter()
        .filter(|a| is_checksum_listing(&a.name))
        .map(|a| a.browser_download_url.clone())
        .collect();
    if checksum_files.is_empty() {
        tracing::debug!(owner, repo, "no checksum assets published");
    }

    let candidates = release
        .assets
        .iter()
        .map(|a| Candidate {
            name: a.name.clone(),
            download_url: a.browser_download_url.clone(),
            asset_url: Some(a.url.clone()),
            checksum: None,
        })
        .collect();

    Ok(Resolved {
        name: format!("github.com/{}/{}", owner, repo),
        version: release.tag_name,
        remote_url: release.url,
        latest_url: format!("https://github.com/{}/{}", owner, repo),
        checksum_file: checksum_files.last().cloned().unwrap_or_default(),
        checksum_files,
        candidates,
    })
}

fn release_url(owner: &str, repo: &str, spec: &ReleaseSpec) -> String {
    match spec {
        ReleaseSpec::Latest => format!("{}/repos/{}/{}/releases/latest", API_BASE, owner, repo),
        ReleaseSpec::Tag(tag) => {
            format!("{}/repos/{}/{}/releases/tags/{}", API_BASE, owner, repo, tag)
        }
        ReleaseSpec::Id(id) => format!("{}/repos/{}/{}/releases/{}", API_BASE, owner, repo, id),
    }
}

/// Whether an asset name looks like a checksum listing.
///
/// Signature and certificate sidecars are excluded even when their names
/// mention checksums.
fn is_checksum_listing(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".pem") || lower.ends_with(".sig") {
        return false;
    }
    (lower.contains("sha") && lower.contains("sum")) || lower.contains("checksum")
}
