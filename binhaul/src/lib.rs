//! binhaul - a personal binary-package manager.
//!
//! binhaul installs single-binary tools from remote release sources,
//! verifies them against published SHA-256 digests, unwraps nested archive
//! containers to reach the executable inside, and records a per-package
//! manifest so later invocations can detect and apply updates idempotently.
//!
//! # Architecture
//!
//! - [`source`] - adapters turning a source identity into a version and a
//!   candidate file list (GitHub releases, checksum-manifest URLs, the
//!   Kubernetes release mirror)
//! - [`resolve`] - candidate selection by glob and checksum lookup
//! - [`install`] - content sniffing, archive unwrapping, and binary
//!   installation
//! - [`manifest`] - the persisted package record and its store
//! - [`engine`] - the install pipeline and the update/diff engine
//! - [`fetch`] - deadline-bounded HTTP plumbing

pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod resolve;
pub mod source;

pub use error::{Error, Result};

/// Crate version, reported in the HTTP user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
