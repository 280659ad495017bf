//! On-disk store of package manifests.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{Error, Result};

use super::core::Manifest;

/// A flat directory of manifest records, one JSON file per package.
///
/// One writer at a time; concurrent invocations are out of scope, so no
/// file locking is performed.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    dir: PathBuf,
}

impl ManifestStore {
    /// Open a store at the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::CreateFailed {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// Open the per-user default store.
    pub fn open_default() -> Result<Self> {
        Self::open(config::store_dir()?)
    }

    /// Directory the records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize a manifest to its record file, pretty-printed.
    ///
    /// The filename is the one the manifest was loaded from, or the name
    /// derived from its source identity, so re-resolving the same logical
    /// package always targets the same record.
    pub fn save(&self, manifest: &Manifest) -> Result<PathBuf> {
        let path = self.dir.join(manifest.store_file_name());
        let json = serde_json::to_string_pretty(manifest).map_err(|e| Error::Json {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| Error::WriteFailed {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "wrote manifest");
        Ok(path)
    }

    /// Load every manifest record in the store.
    ///
    /// Non-regular entries and individually corrupt records are skipped
    /// with a warning; one bad file never blocks listing or updating the
    /// others. Records are returned sorted by filename.
    pub fn load_all(&self) -> Result<Vec<Manifest>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| Error::ReadFailed {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut manifests = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(dir = %self.dir.display(), error = %e, "skipping unreadable store entry");
                    continue;
                }
            };

            let is_regular = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_regular {
                continue;
            }

            let path = entry.path();
            let bytes = match fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not read manifest record");
                    continue;
                }
            };

            match serde_json::from_slice::<Manifest>(&bytes) {
                Ok(mut manifest) => {
                    manifest.file_name = Some(entry.file_name().to_string_lossy().into_owned());
                    manifests.push(manifest);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping corrupt manifest record");
                }
            }
        }

        manifests.sort_by(|a, b| a.store_file_name().cmp(&b.store_file_name()));
        Ok(manifests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Artifact, Source};
    use tempfile::TempDir;

    fn sample_manifest() -> Manifest {
        let mut manifest = Manifest::new(
            Source::Github {
                owner: "cli".to_string(),
                repo: "cli".to_string(),
            },
            "github.com/cli/cli",
        );
        manifest.current_version = "v2.40.0".to_string();
        manifest.artifacts.push(Artifact {
            remote_file: "https://example.com/gh.tar.gz".to_string(),
            checksums: vec!["abc123".to_string()],
            from_glob: "gh_*_linux_amd64.tar.gz".to_string(),
            ..Default::default()
        });
        manifest
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("store");
        let store = ManifestStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::open(temp.path()).unwrap();

        let manifest = sample_manifest();
        let path = store.save(&manifest).unwrap();
        assert!(path.ends_with("github.com_cli_cli"));

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, manifest.name);
        assert_eq!(loaded[0].artifacts, manifest.artifacts);
        assert_eq!(
            loaded[0].file_name.as_deref(),
            Some("github.com_cli_cli"),
            "loaded record keeps its filename for the next save"
        );
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::open(temp.path()).unwrap();

        let path = store.save(&sample_manifest()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains('\n'), "record should be pretty-printed");
        assert!(text.contains("\"type\": \"github\""));
    }

    #[test]
    fn test_load_all_skips_corrupt_record() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::open(temp.path()).unwrap();

        store.save(&sample_manifest()).unwrap();
        fs::write(temp.path().join("broken"), "not json").unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1, "corrupt record must not block the scan");
    }

    #[test]
    fn test_load_all_skips_directories() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::open(temp.path()).unwrap();

        fs::create_dir(temp.path().join("subdir")).unwrap();
        store.save(&sample_manifest()).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_save_overwrites_loaded_file() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::open(temp.path()).unwrap();

        store.save(&sample_manifest()).unwrap();
        let mut loaded = store.load_all().unwrap().remove(0);
        loaded.current_version = "v2.41.0".to_string();
        store.save(&loaded).unwrap();

        let reloaded = store.load_all().unwrap();
        assert_eq!(reloaded.len(), 1, "save must overwrite the same record");
        assert_eq!(reloaded[0].current_version, "v2.41.0");
    }
}
