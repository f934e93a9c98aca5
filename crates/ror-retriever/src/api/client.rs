//! HTTP client for the ROR affiliation endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{RorError, Result};

use super::response::SearchResponse;

/// ROR organizations endpoint.
pub const DEFAULT_API_URL: &str = "https://api.ror.org/organizations";

/// Default request timeout, same as reqwest's blocking client.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of ranked candidates for an affiliation string.
///
/// Implementations must be thread-safe (Send + Sync) so a client can be
/// shared behind an `Arc`.
pub trait AffiliationClient: Send + Sync {
    /// Look up one normalized affiliation string.
    ///
    /// A single attempt is made; failures are reported as
    /// [`RorError::Transport`], [`RorError::Status`] or [`RorError::Parse`].
    fn search(&self, affiliation: &str) -> Result<SearchResponse>;

    /// Name of this client (for logging/debugging).
    fn name(&self) -> &str;
}

/// Configuration for [`RorClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URL without query string.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking client for `api.ror.org`.
pub struct RorClient {
    client: Client,
    config: ClientConfig,
}

impl RorClient {
    /// Create a client for the public ROR API.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ror-retriever/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl AffiliationClient for RorClient {
    fn search(&self, affiliation: &str) -> Result<SearchResponse> {
        let url = search_url(&self.config.base_url, affiliation);
        debug!("Retrieving Data URL: {}", url);

        let response = self.client.get(&url).send().map_err(|e| RorError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RorError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| RorError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        debug!("Response length: {}", body.len());

        SearchResponse::from_json(&body)
    }

    fn name(&self) -> &str {
        "ror"
    }
}

/// Search URL for an affiliation: `<base>?affiliation=<percent-encoded UTF-8>`.
pub fn search_url(base_url: &str, affiliation: &str) -> String {
    format!("{}?affiliation={}", base_url, urlencoding::encode(affiliation))
}
