//! Error types for binhaul operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for binhaul operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, verifying, or installing packages.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure or non-2xx response.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The command deadline expired during a network call.
    #[error("deadline exceeded while fetching {url}")]
    Timeout { url: String },

    /// Computed digest does not equal an expected digest.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// The requested file is absent from a checksum listing.
    #[error("no checksum found for file: {file}")]
    ChecksumNotFound { file: String },

    /// A selection pattern matched no candidate.
    #[error("no candidate matching {pattern}")]
    NoMatch { pattern: String },

    /// A selection pattern could not be compiled.
    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// An archive was fully scanned without a matching member.
    #[error("no matching files in archive for {pattern}")]
    NoMatchInArchive { pattern: String },

    /// The sniffed content kind has no installation strategy.
    #[error("cannot install content of kind \"{kind}\"")]
    UnsupportedContent { kind: &'static str },

    /// Archive nesting exceeded the decoder's layer cap.
    #[error("archive nesting exceeds {limit} layers")]
    TooManyLayers { limit: usize },

    /// A compression or archive stream could not be read.
    #[error("failed to decode archive: {reason}")]
    Decode { reason: String },

    /// An install destination exists but is not a regular file.
    #[error("{path} exists but is not a regular file")]
    NotRegularFile { path: PathBuf },

    /// Failed to create a file or directory.
    #[error("failed to create {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read a file or directory.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A manifest record could not be serialized.
    #[error("invalid manifest record {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A URL parsed but does not identify a usable source.
    #[error("unsupported source URL {url}: {reason}")]
    UnsupportedUrl { url: String, reason: String },

    /// Failed to construct the HTTP client.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_mismatch_display() {
        let err = Error::ChecksumMismatch {
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("def456"));
    }

    #[test]
    fn test_fetch_display() {
        let err = Error::Fetch {
            url: "https://example.com/file".to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        };
        assert!(err.to_string().contains("https://example.com/file"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::ReadFailed {
            path: PathBuf::from("/test"),
            source: io_err,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_no_match_display() {
        let err = Error::NoMatch {
            pattern: "tool-*.tar.gz".to_string(),
        };
        assert!(err.to_string().contains("tool-*.tar.gz"));
    }
}
