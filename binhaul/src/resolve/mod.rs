//! Candidate selection and checksum resolution.
//!
//! A source adapter yields an ordered list of named remote files; the
//! matcher picks the one (or every one) a shell glob selects, and the
//! checksum resolver supplies the expected digest for a selected file
//! from a line-oriented checksum listing.

pub mod matcher;
pub mod shasums;

pub use self::matcher::{match_all, match_first, Candidate};
