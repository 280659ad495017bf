//! Writing binaries to disk and the local idempotency check.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::resolve::shasums;

/// State of an install destination before any network work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalState {
    /// The destination does not exist; the expected needs-install case.
    Missing,
    /// The destination exists and matches every stored checksum.
    Verified,
}

/// Write a binary to its destination and mark it executable.
///
/// Creates the parent directory if missing, creates or truncates the
/// file, and sets mode 0755. A chmod failure is logged but does not fail
/// the operation; the written content is more valuable than a correctly
/// permissioned placeholder. Create and write failures are fatal to the
/// current artifact.
pub fn install_binary(bytes: &[u8], dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::CreateFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(dest, bytes).map_err(|e| Error::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %dest.display(), size = bytes.len(), "wrote file");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(0o755)) {
            tracing::warn!(path = %dest.display(), error = %e, "failed to set file mode");
        }
    }

    Ok(())
}

/// Check an install destination against the stored checksums.
///
/// Returns [`LocalState::Missing`] when the path does not exist and
/// [`LocalState::Verified`] when it is a regular file matching every
/// digest, in which case the whole download/verify/extract pipeline can
/// be skipped. A path that exists but is not a regular file, or whose
/// content fails checksum comparison, is surfaced as an error; the caller
/// decides whether to overwrite.
pub fn verify_local_file(path: &Path, checksums: &[String]) -> Result<LocalState> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LocalState::Missing),
        Err(e) => {
            return Err(Error::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if !metadata.is_file() {
        return Err(Error::NotRegularFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|e| Error::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    shasums::verify_all(&bytes, checksums)?;
    tracing::debug!(path = %path.display(), "local file exists and matches checksums");
    Ok(LocalState::Verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_install_binary_writes_content() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool");

        install_binary(b"binary content", &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"binary content");
    }

    #[cfg(unix)]
    #[test]
    fn test_install_binary_sets_executable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool");

        install_binary(b"binary content", &dest).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_install_binary_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("nested/bin/tool");

        install_binary(b"binary content", &dest).unwrap();

        assert!(dest.is_file());
    }

    #[test]
    fn test_install_binary_truncates_existing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool");

        fs::write(&dest, "old much longer content here").unwrap();
        install_binary(b"new", &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn test_verify_local_file_missing() {
        let temp = TempDir::new().unwrap();
        let state = verify_local_file(&temp.path().join("absent"), &[]).unwrap();
        assert_eq!(state, LocalState::Missing);
    }

    #[test]
    fn test_verify_local_file_verified() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool");
        fs::write(&dest, "hello world").unwrap();

        let checksums =
            vec!["b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9".to_string()];
        let state = verify_local_file(&dest, &checksums).unwrap();
        assert_eq!(state, LocalState::Verified);
    }

    #[test]
    fn test_verify_local_file_mismatch() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool");
        fs::write(&dest, "tampered").unwrap();

        let checksums = vec!["0000000000000000".to_string()];
        let err = verify_local_file(&dest, &checksums).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_verify_local_file_directory_is_not_regular() {
        let temp = TempDir::new().unwrap();
        let err = verify_local_file(temp.path(), &[]).unwrap_err();
        assert!(matches!(err, Error::NotRegularFile { .. }));
    }
}
