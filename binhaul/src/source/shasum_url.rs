//! Checksum-manifest-URL source adapter.
//!
//! The given URL is itself the checksum listing:
//!
//! ```text
//! f24ea6a5d24b…  ccoctl-linux-4.14.1.tar.gz
//! f17c71622d9a…  openshift-client-linux-4.14.1.tar.gz
//! ```
//!
//! Each entry becomes a candidate with its digest embedded; download URLs
//! are resolved relative to the listing URL.

use url::Url;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::resolve::{shasums, Candidate};

use super::Resolved;

pub(super) fn resolve(client: &dyn HttpClient, listing_url: &str) -> Result<Resolved> {
    let base = Url::parse(listing_url).map_err(|e| Error::InvalidUrl {
        url: listing_url.to_string(),
        source: e,
    })?;

    let entries = shasums::fetch_listing(client, listing_url)?;
    tracing::debug!(url = listing_url, entries = entries.len(), "fetched checksum listing");

    let mut candidates = Vec::with_capacity(entries.len());
    for entry in entries {
        let download = base.join(&entry.name).map_err(|e| Error::InvalidUrl {
            url: entry.name.clone(),
            source: e,
        })?;
        candidates.push(Candidate {
            name: entry.name,
            download_url: download.into(),
            asset_url: None,
            checksum: Some(entry.sum),
        });
    }

    Ok(Resolved {
        name: listing_url.to_string(),
        version: String::new(),
        remote_url: String::new(),
        latest_url: listing_url.to_string(),
        checksum_file: String::new(),
        checksum_files: Vec::new(),
        candidates,
    })
}
