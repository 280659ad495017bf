//! HTTP client abstraction for testability.

use reqwest::blocking::Client;

use super::Deadline;
use crate::error::{Error, Result};

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    fn get(&self, url: &str) -> Result<Vec<u8>>;

    /// Performs an HTTP GET request and returns the body as UTF-8 text.
    fn get_string(&self, url: &str) -> Result<String> {
        let bytes = self.get(url)?;
        String::from_utf8(bytes).map_err(|e| Error::Fetch {
            url: url.to_string(),
            reason: format!("response is not UTF-8: {}", e),
        })
    }
}

/// Real HTTP client implementation using reqwest.
///
/// Every request is bounded by the remaining time of the command
/// [`Deadline`] the client was created with.
pub struct ReqwestClient {
    client: Client,
    deadline: Deadline,
}

impl ReqwestClient {
    /// Creates a client with the default five-minute command deadline.
    pub fn new() -> Result<Self> {
        Self::with_deadline(Deadline::default())
    }

    /// Creates a client bounded by the given deadline.
    pub fn with_deadline(deadline: Deadline) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("binhaul/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        Ok(Self { client, deadline })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let remaining = self.deadline.remaining().ok_or_else(|| Error::Timeout {
            url: url.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .timeout(remaining)
            .send()
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| classify(url, e))
    }
}

/// Map a reqwest error to the taxonomy, keeping deadline expiry distinct.
fn classify(url: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
        }
    } else {
        Error::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Mock HTTP client for testing.
    ///
    /// Maps URLs to canned response bodies; unknown URLs fail like a 404.
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        pub responses: HashMap<String, Vec<u8>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(url.to_string(), body.into());
            self
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| Error::Fetch {
                    url: url.to_string(),
                    reason: "HTTP 404 Not Found".to_string(),
                })
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::new().with_response("http://example.com", vec![1, 2, 3, 4]);

        let result = mock.get("http://example.com");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_mock_client_unknown_url() {
        let mock = MockHttpClient::new();

        let result = mock.get("http://example.com/missing");
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_get_string_rejects_invalid_utf8() {
        let mock = MockHttpClient::new().with_response("http://example.com", vec![0xff, 0xfe]);

        let result = mock.get_string("http://example.com");
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }
}
