//! Content sniffing, archive unwrapping, and binary installation.
//!
//! The decoder takes a downloaded byte blob, identifies it by magic bytes
//! only (filenames and extensions are never trusted), unwraps compression
//! layers until an installable executable is reached, and writes it to
//! its destination with the executable bit set.

pub mod decoder;
pub mod installer;
pub mod sniff;

pub use self::decoder::unpack_and_install;
pub use self::installer::{install_binary, verify_local_file, LocalState};
pub use self::sniff::{sniff, ContentKind};
