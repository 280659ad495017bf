//! The install pipeline and the update/diff engine.
//!
//! `install` turns a source identity into a saved manifest with verified,
//! installed artifacts. `update` re-resolves a stored manifest against its
//! source and re-runs the pipeline only for artifacts whose remote
//! identity changed; `status` reports the same comparison without
//! fetching content or writing files. Both paths share one equality test,
//! so "status says update available" and "update actually updates" cannot
//! disagree.

mod install;
mod update;

pub use self::install::install;
pub use self::update::{
    diff, status, update, ArtifactChange, ArtifactDiff, PackageStatus, UpdateReport,
};

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::resolve::{shasums, Candidate};
use crate::source::Resolved;

/// Collect every expected digest for a candidate.
///
/// A digest embedded in the candidate's listing comes first, then one
/// lookup per checksum listing the source published. An empty result
/// means the source opted out of checksums and the artifact installs
/// unverified.
pub(crate) fn expected_checksums(
    client: &dyn HttpClient,
    resolved: &Resolved,
    candidate: &Candidate,
) -> Result<Vec<String>> {
    let mut checksums = Vec::new();
    if let Some(sum) = &candidate.checksum {
        checksums.push(sum.clone());
    }
    for listing in &resolved.checksum_files {
        checksums.push(shasums::fetch_sum_for_file(client, listing, &candidate.name)?);
    }
    if checksums.is_empty() {
        tracing::debug!(name = %candidate.name, "no checksum source available; installing unverified");
    }
    Ok(checksums)
}
