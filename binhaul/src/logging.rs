//! Logging infrastructure for binhaul.
//!
//! Structured logging goes to stderr so command output on stdout stays
//! machine-readable. The filter honors `RUST_LOG` when set and falls back
//! to the level the CLI was invoked with.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `default_level` - Filter directive used when `RUST_LOG` is not set
///   (e.g., "warn", "debug").
///
/// # Errors
///
/// Returns a message if a global subscriber is already installed.
pub fn init(default_level: &str) -> std::result::Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}
