//! Mock client for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{RorError, Result};

use super::client::{AffiliationClient, DEFAULT_API_URL, search_url};
use super::response::SearchResponse;

/// Client that returns canned responses keyed by affiliation string.
///
/// Affiliations without a canned response get an empty (zero result)
/// response unless registered as failures.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: HashMap<String, SearchResponse>,
    failures: HashMap<String, Failure>,
    calls: AtomicUsize,
}

/// Kind of failure injected for an affiliation.
#[derive(Debug, Clone, Copy)]
enum Failure {
    Transport,
    Status(u16),
    MalformedBody,
}

impl MockClient {
    /// Create a mock client with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `response` when `affiliation` is searched.
    pub fn with_response(mut self, affiliation: impl Into<String>, response: SearchResponse) -> Self {
        self.responses.insert(affiliation.into(), response);
        self
    }

    /// Fail with a transport error when `affiliation` is searched.
    pub fn with_failure(mut self, affiliation: impl Into<String>) -> Self {
        self.failures.insert(affiliation.into(), Failure::Transport);
        self
    }

    /// Answer `affiliation` with a non-200 HTTP status.
    pub fn with_status(mut self, affiliation: impl Into<String>, status: u16) -> Self {
        self.failures.insert(affiliation.into(), Failure::Status(status));
        self
    }

    /// Answer `affiliation` with a body missing required fields.
    pub fn with_malformed_body(mut self, affiliation: impl Into<String>) -> Self {
        self.failures.insert(affiliation.into(), Failure::MalformedBody);
        self
    }

    /// Number of searches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AffiliationClient for MockClient {
    fn search(&self, affiliation: &str) -> Result<SearchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let url = search_url(DEFAULT_API_URL, affiliation);
        match self.failures.get(affiliation) {
            Some(Failure::Transport) => {
                return Err(RorError::Transport {
                    url,
                    message: "connection refused".to_string(),
                });
            }
            Some(Failure::Status(status)) => {
                return Err(RorError::Status {
                    url,
                    status: *status,
                });
            }
            Some(Failure::MalformedBody) => {
                return SearchResponse::from_json(r#"{"items": []}"#);
            }
            None => {}
        }

        Ok(self
            .responses
            .get(affiliation)
            .cloned()
            .unwrap_or_else(SearchResponse::empty))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MatchCandidate, MatchingType, Organization};

    #[test]
    fn test_canned_and_default_responses() {
        let candidate = MatchCandidate::new(
            "CERN",
            1.0,
            MatchingType::Exact,
            true,
            Organization::new("https://ror.org/01ggx4157", "CERN", "Switzerland"),
        );
        let client = MockClient::new()
            .with_response("CERN", SearchResponse::with_items(vec![candidate]))
            .with_failure("offline")
            .with_status("gone", 500)
            .with_malformed_body("garbled");

        assert_eq!(client.search("CERN").unwrap().number_of_results, 1);
        assert_eq!(client.search("unknown").unwrap(), SearchResponse::empty());
        assert!(matches!(client.search("offline"), Err(RorError::Transport { .. })));
        assert!(matches!(client.search("gone"), Err(RorError::Status { status: 500, .. })));
        assert!(matches!(client.search("garbled"), Err(RorError::Parse(_))));
        assert_eq!(client.calls(), 5);
    }
}
