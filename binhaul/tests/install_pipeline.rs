//! End-to-end pipeline tests against a mock HTTP client.
//!
//! Exercises the full install → status → update flow the way the CLI
//! drives it: resolve a checksum listing, verify and unwrap the download,
//! install the inner executable, persist the manifest, then detect and
//! apply a new release.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use binhaul::engine;
use binhaul::error::Result;
use binhaul::fetch::HttpClient;
use binhaul::manifest::{ManifestStore, Source};
use binhaul::resolve::shasums;
use binhaul::source::ReleaseSpec;
use tempfile::TempDir;

const LISTING_URL: &str = "https://mirror.example.com/stable/sha256sums.txt";

/// Mock HTTP client counting GET calls per URL.
struct MockClient {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    counts: Mutex<HashMap<String, usize>>,
}

impl MockClient {
    fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            counts: Mutex::new(HashMap::new()),
        }
    }

    fn set(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
    }

    fn remove(&self, url: &str) {
        self.responses.lock().unwrap().remove(url);
    }

    fn count(&self, url: &str) -> usize {
        self.counts.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

impl HttpClient for MockClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| binhaul::Error::Fetch {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }
}

fn fake_elf(tag: &str) -> Vec<u8> {
    let mut blob = vec![0x7f, b'E', b'L', b'F'];
    blob.extend_from_slice(tag.as_bytes());
    blob
}

/// gzip(tar) archive holding `bin/tool` with the given content.
fn tool_archive(elf: &[u8]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    header.set_size(elf.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder.append_data(&mut header, "bin/tool", elf).unwrap();
    let tar_bytes = builder.into_inner().unwrap();

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_bytes).unwrap();
    encoder.finish().unwrap()
}

fn publish(client: &MockClient, version: &str, archive: &[u8]) -> String {
    let name = format!("tool-linux-amd64-{}.tar.gz", version);
    let url = format!("https://mirror.example.com/stable/{}", name);
    client.set(
        LISTING_URL,
        format!("{}  {}\n", shasums::compute(archive), name),
    );
    client.set(&url, archive.to_vec());
    url
}

fn install_tool(client: &MockClient, store: &ManifestStore, dest: &Path) -> binhaul::manifest::Manifest {
    engine::install(
        client,
        store,
        Source::ShasumUrl {
            url: LISTING_URL.to_string(),
        },
        &ReleaseSpec::Latest,
        "tool-linux-amd64-*.tar.gz",
        dest.to_str().unwrap(),
    )
    .unwrap()
}

#[test]
fn full_lifecycle_install_status_update() {
    let temp = TempDir::new().unwrap();
    let store = ManifestStore::open(temp.path().join("store")).unwrap();
    let dest = temp.path().join("tool");

    let client = MockClient::new();
    let elf_v1 = fake_elf("v1");
    let url_v1 = publish(&client, "1.0.0", &tool_archive(&elf_v1));

    // Install resolves, verifies, unwraps, and installs the executable.
    let manifest = install_tool(&client, &store, &dest);
    assert_eq!(std::fs::read(&dest).unwrap(), elf_v1);
    assert_eq!(manifest.artifacts.len(), 1);
    let inner = &manifest.artifacts[0].inner_artifacts[0];
    assert_eq!(inner.source_path, "bin/tool");
    assert!(inner.installed);

    // Status with no new release: nothing to do.
    let mut stored = store.load_all().unwrap().remove(0);
    let report = engine::status(&client, &stored).unwrap();
    assert!(!report.update_available());

    // A new release appears.
    let elf_v2 = fake_elf("v2");
    let url_v2 = publish(&client, "1.1.0", &tool_archive(&elf_v2));
    client.remove(&url_v1);

    // Status sees it without downloading content.
    let report = engine::status(&client, &stored).unwrap();
    assert!(report.update_available());
    assert_eq!(client.count(&url_v2), 0, "status must not fetch content");

    // Update applies it to the same destination and persists the record.
    let report = engine::update(&client, &store, &mut stored).unwrap();
    assert!(report.updated());
    assert_eq!(std::fs::read(&dest).unwrap(), elf_v2);
    assert_eq!(client.count(&url_v2), 1);

    let reloaded = store.load_all().unwrap().remove(0);
    assert!(reloaded.artifacts[0].remote_file.ends_with("tool-linux-amd64-1.1.0.tar.gz"));

    // A second update pass is a pure skip: no fetch, no rewrite.
    let mut again = store.load_all().unwrap().remove(0);
    let report = engine::update(&client, &store, &mut again).unwrap();
    assert!(!report.updated());
    assert_eq!(client.count(&url_v2), 1, "unchanged artifact must not re-download");
}

#[test]
fn reinstall_after_manual_delete_downloads_again() {
    let temp = TempDir::new().unwrap();
    let store = ManifestStore::open(temp.path().join("store")).unwrap();
    let dest = temp.path().join("tool");

    let client = MockClient::new();
    let elf = fake_elf("v1");
    let url = publish(&client, "1.0.0", &tool_archive(&elf));

    install_tool(&client, &store, &dest);
    assert_eq!(client.count(&url), 1);

    // Idempotent re-install: destination satisfied, no new download.
    install_tool(&client, &store, &dest);
    assert_eq!(client.count(&url), 1);

    // Deleted binary: the pipeline runs again.
    std::fs::remove_file(&dest).unwrap();
    install_tool(&client, &store, &dest);
    assert_eq!(client.count(&url), 2);
    assert_eq!(std::fs::read(&dest).unwrap(), elf);
}

#[test]
fn tampered_download_is_rejected_without_writing() {
    let temp = TempDir::new().unwrap();
    let store = ManifestStore::open(temp.path().join("store")).unwrap();
    let dest = temp.path().join("tool");

    let client = MockClient::new();
    let archive = tool_archive(&fake_elf("v1"));
    let url = publish(&client, "1.0.0", &archive);

    // The served bytes no longer match the listed digest.
    client.set(&url, b"tampered bytes".to_vec());

    let err = engine::install(
        &client,
        &store,
        Source::ShasumUrl {
            url: LISTING_URL.to_string(),
        },
        &ReleaseSpec::Latest,
        "tool-linux-amd64-*.tar.gz",
        dest.to_str().unwrap(),
    )
    .unwrap_err();

    assert!(matches!(err, binhaul::Error::ChecksumMismatch { .. }));
    assert!(!dest.exists());
    assert!(
        store.load_all().unwrap().is_empty(),
        "no manifest may be recorded for a failed install"
    );
}
