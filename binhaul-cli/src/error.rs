//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and a non-zero exit code on failure.

use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// A library operation failed
    Operation(binhaul::Error),
    /// One or more packages failed during a batch command
    PackagesFailed(Vec<String>),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Operation(e) => write!(f, "{}", e),
            CliError::PackagesFailed(names) => {
                write!(f, "{} package(s) failed: {}", names.len(), names.join(", "))
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Operation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<binhaul::Error> for CliError {
    fn from(e: binhaul::Error) -> Self {
        CliError::Operation(e)
    }
}
