//! SHA-256 computation and checksum-listing lookup.
//!
//! Checksum listings are line-oriented, `<hex-digest><whitespace><filename>`
//! per line, as produced by `sha256sum` and friends. Filenames tolerate a
//! leading `*` (the traditional binary-mode marker) and a leading `./`
//! path prefix; both are stripped before comparison.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::fetch::HttpClient;

/// One line of a checksum listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub sum: String,
    pub name: String,
}

/// SHA-256 of a byte blob as lowercase hex.
pub fn compute(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Verify a blob against one expected digest.
pub fn verify(bytes: &[u8], expected: &str) -> Result<()> {
    let actual = compute(bytes);
    if actual != expected {
        return Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Verify a blob against every expected digest; all must match.
pub fn verify_all(bytes: &[u8], checksums: &[String]) -> Result<()> {
    for checksum in checksums {
        verify(bytes, checksum)?;
    }
    Ok(())
}

fn normalize_name(name: &str) -> &str {
    let name = name.strip_prefix('*').unwrap_or(name);
    name.strip_prefix("./").unwrap_or(name)
}

/// Parse a checksum listing into entries with normalized filenames.
///
/// Lines without a digest/name pair are ignored.
pub fn parse_listing(text: &str) -> Vec<ChecksumEntry> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let (sum, rest) = line.split_once(char::is_whitespace)?;
            let name = normalize_name(rest.trim());
            if sum.is_empty() || name.is_empty() {
                return None;
            }
            Some(ChecksumEntry {
                sum: sum.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Find the digest for an exact filename in a listing.
///
/// No globbing at this stage: the normalized listing name must equal the
/// target exactly.
pub fn sum_for_file(text: &str, file: &str) -> Result<String> {
    parse_listing(text)
        .into_iter()
        .find(|entry| entry.name == file)
        .map(|entry| entry.sum)
        .ok_or_else(|| Error::ChecksumNotFound {
            file: file.to_string(),
        })
}

/// Fetch a checksum listing and parse it.
pub fn fetch_listing(client: &dyn HttpClient, url: &str) -> Result<Vec<ChecksumEntry>> {
    let text = client.get_string(url)?;
    Ok(parse_listing(&text))
}

/// Fetch a checksum listing and look up one file's digest.
///
/// No caching: every call re-fetches the listing, so resolving N digests
/// against the same listing costs N fetches.
pub fn fetch_sum_for_file(client: &dyn HttpClient, url: &str, file: &str) -> Result<String> {
    let text = client.get_string(url)?;
    sum_for_file(&text, file)
}
