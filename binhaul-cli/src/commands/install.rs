//! The `install` command.

use binhaul::engine;
use binhaul::fetch::ReqwestClient;
use binhaul::manifest::ManifestStore;
use binhaul::source::{self, SourceKind};

use crate::error::CliError;
use crate::SourceTypeArg;

use super::base_name;

pub fn run(url: &str, source_type: SourceTypeArg, file: &str, outfile: &str) -> Result<(), CliError> {
    let kind = match source_type {
        SourceTypeArg::Github => SourceKind::Github,
        SourceTypeArg::Tarball | SourceTypeArg::Shasumurl => SourceKind::ShasumUrl,
        SourceTypeArg::Kubeurl => SourceKind::KubeUrl,
    };

    let (source, release) = source::source_for_url(url, kind)?;
    tracing::debug!(source = %source, kind = source.kind(), file, outfile, "attempting install");

    let client = ReqwestClient::new()?;
    let store = ManifestStore::open_default()?;

    let manifest = engine::install(&client, &store, source, &release, file, outfile)?;

    println!("Package {} {}", manifest.name, manifest.current_version);
    for artifact in &manifest.artifacts {
        if let Some(dest) = artifact.installed_destination() {
            println!("  installed {} from {}", base_name(dest), artifact.remote_file);
        }
    }
    Ok(())
}
