//! Source adapters.
//!
//! A source adapter turns a package's typed identity into the current
//! remote state: a version string, bookkeeping URLs, and an ordered list
//! of candidate files. One implementation per source kind, dispatched at
//! a single point ([`Source::resolve`]); everything downstream of the
//! adapters is source-agnostic.

mod github;
mod kube;
mod shasum_url;

pub use self::kube::STABLE_VERSION_URL;

use url::Url;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::manifest::Source;
use crate::resolve::Candidate;

/// Freshly observed remote state for a package.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    /// Stable human-readable package identity.
    pub name: String,

    /// Current version string; opaque, compared for equality only.
    pub version: String,

    /// Remote location the version was resolved from.
    pub remote_url: String,

    /// Location to consult for future versions.
    pub latest_url: String,

    /// Checksum listing recorded in the manifest; empty when the source
    /// embeds digests in the candidates directly.
    pub checksum_file: String,

    /// Checksum listings to look selected candidates up in.
    pub checksum_files: Vec<String>,

    /// Named remote files offered by this resolution, in source order.
    pub candidates: Vec<Candidate>,
}

/// How a source selects candidates from its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Install the first candidate the pattern matches.
    First,
    /// Install every candidate the pattern matches.
    Every,
    /// The source yields exactly one candidate; no pattern involved.
    Sole,
}

/// Which release of a source to resolve.
///
/// Only GitHub sources distinguish these; persisted identities always
/// track the latest release on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReleaseSpec {
    #[default]
    Latest,
    Tag(String),
    Id(u64),
}

/// Requested source kind, before host-based overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Github,
    ShasumUrl,
    KubeUrl,
}

impl Source {
    /// Resolve the current remote state of this source.
    pub fn resolve(&self, client: &dyn HttpClient, release: &ReleaseSpec) -> Result<Resolved> {
        match self {
            Source::Github { owner, repo } => github::resolve(client, owner, repo, release),
            Source::ShasumUrl { url } => shasum_url::resolve(client, url),
            Source::KubeUrl { url } => kube::resolve(client, url),
        }
    }

    /// Resolve the latest release of this source.
    pub fn resolve_latest(&self, client: &dyn HttpClient) -> Result<Resolved> {
        self.resolve(client, &ReleaseSpec::Latest)
    }

    /// Candidate selection policy for this source.
    pub fn selection(&self) -> Selection {
        match self {
            Source::Github { .. } => Selection::First,
            Source::ShasumUrl { .. } => Selection::Every,
            Source::KubeUrl { .. } => Selection::Sole,
        }
    }
}

/// Turn an install URL into a source identity and release spec.
///
/// URLs without a scheme are assumed https. Hosts `github.com` and
/// `dl.k8s.io` force their source kinds regardless of the requested one.
/// GitHub URLs may pin a release with `/releases/tag/<tag>` or
/// `/releases/id/<id>` path suffixes.
pub fn source_for_url(raw_url: &str, requested: SourceKind) -> Result<(Source, ReleaseSpec)> {
    let normalized = if raw_url.contains("://") {
        raw_url.to_string()
    } else {
        format!("https://{}", raw_url)
    };
    let url = Url::parse(&normalized).map_err(|e| Error::InvalidUrl {
        url: normalized.clone(),
        source: e,
    })?;

    let kind = match url.host_str() {
        Some("github.com") => SourceKind::Github,
        Some("dl.k8s.io") => SourceKind::KubeUrl,
        _ => requested,
    };

    match kind {
        SourceKind::Github => {
            let segments: Vec<&str> = url
                .path_segments()
                .map(|s| s.filter(|p| !p.is_empty()).collect())
                .unwrap_or_default();
            let (owner, repo) = match (segments.first(), segments.get(1)) {
                (Some(owner), Some(repo)) => (owner.to_string(), repo.to_string()),
                _ => {
                    return Err(Error::UnsupportedUrl {
                        url: normalized,
                        reason: "expected github.com/<owner>/<repo>".to_string(),
                    })
                }
            };
            let release = match (segments.get(2), segments.get(3), segments.get(4)) {
                (Some(&"releases"), Some(&"tag"), Some(tag)) => ReleaseSpec::Tag(tag.to_string()),
                (Some(&"releases"), Some(&"id"), Some(id)) => {
                    let id = id.parse().map_err(|_| Error::UnsupportedUrl {
                        url: normalized.clone(),
                        reason: format!("release id \"{}\" is not a number", id),
                    })?;
                    ReleaseSpec::Id(id)
                }
                _ => ReleaseSpec::Latest,
            };
            Ok((Source::Github { owner, repo }, release))
        }
        SourceKind::ShasumUrl => Ok((
            Source::ShasumUrl { url: normalized },
            ReleaseSpec::Latest,
        )),
        SourceKind::KubeUrl => Ok((Source::KubeUrl { url: normalized }, ReleaseSpec::Latest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_host_forces_kind() {
        let (source, release) =
            source_for_url("https://github.com/cli/cli", SourceKind::ShasumUrl).unwrap();
        assert_eq!(
            source,
            Source::Github {
                owner: "cli".to_string(),
                repo: "cli".to_string(),
            }
        );
        assert_eq!(release, ReleaseSpec::Latest);
    }

    #[test]
    fn test_kube_host_forces_kind() {
        let (source, _) = source_for_url(
            "https://dl.k8s.io/v1.31.0/bin/linux/amd64/kubectl",
            SourceKind::Github,
        )
        .unwrap();
        assert!(matches!(source, Source::KubeUrl { .. }));
    }

    #[test]
    fn test_scheme_is_defaulted() {
        let (source, _) = source_for_url("github.com/cli/cli", SourceKind::Github).unwrap();
        assert!(matches!(source, Source::Github { .. }));
    }

    #[test]
    fn test_github_tag_pin() {
        let (_, release) = source_for_url(
            "https://github.com/cli/cli/releases/tag/v2.40.0",
            SourceKind::Github,
        )
        .unwrap();
        assert_eq!(release, ReleaseSpec::Tag("v2.40.0".to_string()));
    }

    #[test]
    fn test_github_id_pin() {
        let (_, release) = source_for_url(
            "https://github.com/cli/cli/releases/id/12345",
            SourceKind::Github,
        )
        .unwrap();
        assert_eq!(release, ReleaseSpec::Id(12345));
    }

    #[test]
    fn test_github_bad_id_is_rejected() {
        let err = source_for_url(
            "https://github.com/cli/cli/releases/id/notanumber",
            SourceKind::Github,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedUrl { .. }));
    }

    #[test]
    fn test_github_without_repo_is_rejected() {
        let err = source_for_url("https://github.com/cli", SourceKind::Github).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUrl { .. }));
    }

    #[test]
    fn test_shasumurl_passthrough() {
        let (source, _) = source_for_url(
            "https://example.com/release/sha256sums.txt",
            SourceKind::ShasumUrl,
        )
        .unwrap();
        assert_eq!(
            source,
            Source::ShasumUrl {
                url: "https://example.com/release/sha256sums.txt".to_string(),
            }
        );
    }

    #[test]
    fn test_selection_policy_per_source() {
        let github = Source::Github {
            owner: "o".to_string(),
            repo: "r".to_string(),
        };
        let shasum = Source::ShasumUrl {
            url: "https://example.com/sums".to_string(),
        };
        let kube = Source::KubeUrl {
            url: "https://dl.k8s.io/v1/bin/linux/amd64/kubectl".to_string(),
        };
        assert_eq!(github.selection(), Selection::First);
        assert_eq!(shasum.selection(), Selection::Every);
        assert_eq!(kube.selection(), Selection::Sole);
    }
}
