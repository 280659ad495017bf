//! Directory layout for the manifest store and installed binaries.
//!
//! binhaul keeps one JSON manifest per package under
//! `~/.local/share/binhaul/` and installs binaries into `~/.local/bin/`
//! unless an absolute destination is given.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory name for the manifest store, under the per-user data directory.
pub const STORE_DIR_NAME: &str = "binhaul";

/// Directory holding the per-package manifest records.
pub fn store_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".local/share").join(STORE_DIR_NAME))
        .ok_or(Error::NoHomeDir)
}

/// Default installation directory for binaries.
pub fn bin_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".local/bin"))
        .ok_or(Error::NoHomeDir)
}

/// Resolve the destination path for an installed binary.
///
/// An empty `out_file` falls back to `fallback_name` (normally the remote
/// file name). Relative paths land in [`bin_dir`]; absolute paths are used
/// as given.
pub fn resolve_out_file(out_file: &str, fallback_name: &str) -> Result<PathBuf> {
    let name = if out_file.is_empty() {
        fallback_name
    } else {
        out_file
    };
    let path = Path::new(name);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(bin_dir()?.join(path))
    }
}
