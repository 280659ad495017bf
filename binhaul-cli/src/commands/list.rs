//! The `list` command.

use binhaul::manifest::ManifestStore;

use crate::error::CliError;

use super::base_name;

/// Print every stored package, its artifacts, and the files they
/// installed. Entirely offline.
pub fn run() -> Result<(), CliError> {
    let store = ManifestStore::open_default()?;

    for manifest in store.load_all()? {
        println!("Package {} {}", manifest.name, manifest.current_version);
        for artifact in &manifest.artifacts {
            println!("  {}", artifact.remote_file);
            if artifact.installed {
                println!("    - {}", base_name(&artifact.local_file));
            }
            for inner in &artifact.inner_artifacts {
                if inner.installed {
                    println!("    - {}", base_name(&inner.local_file));
                }
            }
        }
    }
    Ok(())
}
