//! The `update` command.

use binhaul::engine;
use binhaul::fetch::ReqwestClient;
use binhaul::manifest::ManifestStore;
use binhaul::Error;

use crate::error::CliError;

use super::base_name;

/// Update every stored package, or only the named ones.
///
/// A failure updating one package is reported and does not prevent
/// attempting the rest; the command exits non-zero if any failed. A
/// deadline expiry aborts the whole batch, since later packages share
/// the same command deadline.
pub fn run(packages: &[String]) -> Result<(), CliError> {
    let client = ReqwestClient::new()?;
    let store = ManifestStore::open_default()?;
    let manifests = store.load_all()?;

    let mut failed = Vec::new();
    for mut manifest in manifests {
        if !packages.is_empty() && !packages.iter().any(|p| p == &manifest.name) {
            continue;
        }

        println!("Package {} {}", manifest.name, manifest.current_version);
        match engine::update(&client, &store, &mut manifest) {
            Ok(report) if report.updated() => {
                if !report.to_version.is_empty() && report.from_version != report.to_version {
                    println!("  upgrade {} -> {}", report.from_version, report.to_version);
                }
                for change in &report.upgraded {
                    println!(
                        "    - {} -> {}",
                        base_name(&change.old_remote),
                        base_name(&change.new_remote)
                    );
                }
            }
            Ok(_) => println!("  no update needed"),
            Err(e @ Error::Timeout { .. }) => return Err(e.into()),
            Err(e) => {
                tracing::debug!(package = %manifest.name, error = %e, "update failed");
                println!("  error: {}", e);
                failed.push(manifest.name.clone());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::PackagesFailed(failed))
    }
}
