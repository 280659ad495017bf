//! Deadline-bounded HTTP plumbing.
//!
//! Every network operation in binhaul goes through the [`HttpClient`]
//! trait so source adapters and the checksum resolver can be tested with
//! a mock client. The real client carries a whole-command [`Deadline`]:
//! each request's timeout is the deadline's remaining time, so a slow
//! sequence of calls cannot outlive the command deadline.

mod http;

pub use self::http::{HttpClient, ReqwestClient};

#[cfg(test)]
pub use self::http::tests::MockHttpClient;

use std::time::{Duration, Instant};

/// Default whole-command deadline in seconds.
pub const DEFAULT_DEADLINE_SECS: u64 = 300; // 5 minutes

/// A fixed point in time that bounds all network calls of one command.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
}

impl Deadline {
    /// Create a deadline expiring after `limit`.
    pub fn new(limit: Duration) -> Self {
        Self {
            end: Instant::now() + limit,
        }
    }

    /// Time left before expiry, or `None` once the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.end.checked_duration_since(Instant::now())
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_DEADLINE_SECS))
    }
}
