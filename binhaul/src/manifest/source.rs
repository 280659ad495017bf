//! Typed source identity for a package.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity of the remote source a package was installed from.
///
/// Serialized adjacently tagged so the on-disk record keeps the
/// `"type": …, "properties": {…}` shape:
///
/// ```
/// use binhaul::manifest::Source;
///
/// let source = Source::Github {
///     owner: "cli".to_string(),
///     repo: "cli".to_string(),
/// };
/// let json = serde_json::to_value(&source).unwrap();
/// assert_eq!(json["type"], "github");
/// assert_eq!(json["properties"]["owner"], "cli");
/// ```
///
/// Source identity is immutable after a manifest is created; updates
/// reconstruct the adapter from this value without re-parsing a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum Source {
    /// A GitHub repository's releases.
    Github { owner: String, repo: String },

    /// A URL pointing directly at a checksum listing; download URLs are
    /// resolved relative to it.
    ShasumUrl { url: String },

    /// A templated download URL whose version path segment tracks the
    /// Kubernetes stable release channel.
    KubeUrl { url: String },
}

impl Source {
    /// Short tag for logging and display.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Github { .. } => "github",
            Source::ShasumUrl { .. } => "shasumurl",
            Source::KubeUrl { .. } => "kubeurl",
        }
    }

    /// Deterministic store filename for this identity.
    ///
    /// Re-resolving the same logical package always targets the same
    /// record.
    pub fn manifest_file_name(&self) -> String {
        match self {
            Source::Github { owner, repo } => format!("github.com_{}_{}", owner, repo),
            Source::ShasumUrl { url } => format!("shasumurl_{}", url.replace('/', "_")),
            Source::KubeUrl { url } => {
                // Segment 0 is the version token; the rest identifies the tool.
                let tail = url::Url::parse(url)
                    .ok()
                    .and_then(|u| {
                        u.path_segments()
                            .map(|s| s.skip(1).collect::<Vec<_>>().join("_"))
                    })
                    .unwrap_or_else(|| url.replace('/', "_"));
                format!("kubeurl_{}", tail)
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Github { owner, repo } => write!(f, "github.com/{}/{}", owner, repo),
            Source::ShasumUrl { url } => write!(f, "{}", url),
            Source::KubeUrl { url } => write!(f, "{}", url),
        }
    }
}
