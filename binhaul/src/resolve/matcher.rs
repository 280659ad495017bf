//! Glob selection over candidate remote files.

use glob::Pattern;

use crate::error::{Error, Result};

/// A named remote file offered by a source adapter, not yet selected or
/// downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    /// Asset filename, the string selection patterns match against.
    pub name: String,

    /// URL the file downloads from.
    pub download_url: String,

    /// API identity of the asset, for sources that distinguish it from
    /// the download URL.
    pub asset_url: Option<String>,

    /// Expected digest, for sources that embed checksums in the listing
    /// the candidate came from.
    pub checksum: Option<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
            asset_url: None,
            checksum: None,
        }
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Select the first candidate whose name matches the pattern, in source
/// order.
///
/// Shell-glob semantics: `*`, `?`, and character classes; no recursive
/// path semantics.
pub fn match_first<'a>(candidates: &'a [Candidate], pattern: &str) -> Result<&'a Candidate> {
    let compiled = compile(pattern)?;
    candidates
        .iter()
        .find(|c| compiled.matches(&c.name))
        .ok_or_else(|| Error::NoMatch {
            pattern: pattern.to_string(),
        })
}

/// The sole candidate of a single-file source; no pattern is applied.
///
/// The pattern is carried only so an empty candidate list reports what
/// the caller was looking for.
pub fn sole<'a>(candidates: &'a [Candidate], pattern: &str) -> Result<&'a Candidate> {
    candidates.first().ok_or_else(|| Error::NoMatch {
        pattern: pattern.to_string(),
    })
}

/// Select every candidate matching the pattern, preserving source order.
///
/// Used by checksum-manifest sources, where one pattern may legitimately
/// install several files.
pub fn match_all<'a>(candidates: &'a [Candidate], pattern: &str) -> Result<Vec<&'a Candidate>> {
    let compiled = compile(pattern)?;
    let matches: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| compiled.matches(&c.name))
        .collect();
    if matches.is_empty() {
        return Err(Error::NoMatch {
            pattern: pattern.to_string(),
        });
    }
    Ok(matches)
}
