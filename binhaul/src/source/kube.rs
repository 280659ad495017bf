//! Kubernetes release-mirror source adapter.
//!
//! The stored URL is a download path whose first segment is a version
//! token, e.g. `https://dl.k8s.io/v1.31.0/bin/linux/amd64/kubectl`.
//! Resolution reads the stable channel's version from a fixed URL,
//! substitutes it into the path, and pairs the single candidate with the
//! digest published in its `.sha256` sidecar.

use url::Url;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::resolve::Candidate;

use super::Resolved;

/// Fixed URL naming the latest stable Kubernetes version.
pub const STABLE_VERSION_URL: &str = "https://dl.k8s.io/release/stable.txt";

pub(super) fn resolve(client: &dyn HttpClient, template_url: &str) -> Result<Resolved> {
    let version = client.get_string(STABLE_VERSION_URL)?.trim().to_string();
    tracing::debug!(version = %version, "resolved stable kubernetes version");

    let mut url = Url::parse(template_url).map_err(|e| Error::InvalidUrl {
        url: template_url.to_string(),
        source: e,
    })?;
    let mut segments: Vec<String> = url
        .path_segments()
        .map(|s| s.map(str::to_string).collect())
        .unwrap_or_default();
    if segments.is_empty() {
        return Err(Error::UnsupportedUrl {
            url: template_url.to_string(),
            reason: "expected a version segment followed by a file path".to_string(),
        });
    }

    // Segment 0 is the version token.
    segments[0] = version.clone();
    url.set_path(&segments.join("/"));
    let remote_file = url.to_string();

    let file_name = segments.last().cloned().unwrap_or_default();
    let checksum_url = format!("{}.sha256", remote_file);
    let body = client.get_string(&checksum_url)?;
    // The sidecar holds a bare digest; tolerate a trailing filename.
    let digest = body.split_whitespace().next().unwrap_or("").to_string();
    if digest.is_empty() {
        return Err(Error::ChecksumNotFound {
            file: file_name.clone(),
        });
    }

    Ok(Resolved {
        name: format!("dl.k8s.io/.../{}", segments[1..].join("/")),
        version,
        remote_url: STABLE_VERSION_URL.to_string(),
        latest_url: remote_file.clone(),
        checksum_file: checksum_url,
        checksum_files: Vec::new(),
        candidates: vec![Candidate {
            name: file_name,
            download_url: remote_file,
            asset_url: None,
            checksum: Some(digest),
        }],
    })
}
