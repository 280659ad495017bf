//! Persisted package records.
//!
//! Each installed package is tracked by one [`Manifest`], a JSON record
//! holding the package's source identity, the version last reconciled,
//! and the list of [`Artifact`]s that were resolved, verified, and
//! installed. Manifests live as one pretty-printed file per package in
//! the [`ManifestStore`] directory and are rewritten in full whenever any
//! artifact changes.
//!
//! # Record shape
//!
//! ```text
//! Manifest
//! ├── source: Source            (typed identity; serialized as type + properties)
//! ├── name, version, URLs
//! └── artifacts: Vec<Artifact>
//!     ├── remote_file, checksums, from_glob, installed, local_file
//!     └── inner_artifacts: Vec<InnerArtifact>   (members extracted from archives)
//! ```

mod artifact;
mod core;
mod source;
mod store;

pub use self::artifact::{Artifact, InnerArtifact};
pub use self::core::Manifest;
pub use self::source::Source;
pub use self::store::ManifestStore;
