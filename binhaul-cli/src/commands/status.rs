//! The `status` command.

use binhaul::engine;
use binhaul::fetch::ReqwestClient;
use binhaul::manifest::ManifestStore;
use binhaul::Error;

use crate::error::CliError;

use super::base_name;

/// Report which packages have updates available, fetching no content and
/// writing no files.
pub fn run() -> Result<(), CliError> {
    let client = ReqwestClient::new()?;
    let store = ManifestStore::open_default()?;

    let mut failed = Vec::new();
    for manifest in store.load_all()? {
        println!("Package {} {}", manifest.name, manifest.current_version);
        match engine::status(&client, &manifest) {
            Ok(report) if report.update_available() => {
                if !report.latest_version.is_empty()
                    && report.latest_version != report.current_version
                {
                    println!(
                        "  upgrade {} -> {}",
                        report.current_version, report.latest_version
                    );
                }
                for change in &report.changes {
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
