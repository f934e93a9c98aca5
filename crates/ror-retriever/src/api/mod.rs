//! ROR affiliation API: typed response schema and clients.
//!
//! The matching itself happens on the server; this module only fetches and
//! decodes the ranked candidate list for one affiliation string.
//!
//! # Clients
//!
//! - **RorClient** - blocking HTTP client for `api.ror.org`
//! - **MockClient** - canned responses, for tests and offline runs

mod client;
mod mock;
mod response;

pub use client::{AffiliationClient, ClientConfig, DEFAULT_API_URL, RorClient, search_url};
pub use mock::MockClient;
pub use response::{Country, MatchCandidate, MatchingType, Organization, SearchResponse};
