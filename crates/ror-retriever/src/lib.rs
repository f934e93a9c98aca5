//! ROR Retriever: resolve free-text affiliations to ROR identifiers.
//!
//! Each affiliation string is sent to the ROR affiliation API, the ranked
//! candidates it returns are filtered and selected, and the accepted matches
//! are appended to a tab-separated file at a fixed record interval.
//!
//! # Core Principles
//!
//! - **The service decides**: scoring and matching happen remotely; this
//!   crate only selects among the returned candidates
//! - **No silent loss**: every looked-up affiliation yields at least one row
//!   unless the lookup itself fails
//! - **Crash resilient**: results are flushed every `output_interval` records
//!
//! # Example
//!
//! ```no_run
//! use ror_retriever::{AffiliationSource, Retriever, RorClient};
//!
//! let records = AffiliationSource::List(vec!["CERN, Geneva".to_string()]).load().unwrap();
//! let retriever = Retriever::new(RorClient::new().unwrap());
//! let summary = retriever
//!     .run(&records, "results.tsv", &mut std::io::stdout())
//!     .unwrap();
//!
//! println!("{} RORs found", summary.accepted);
//! ```

pub mod api;
pub mod error;
pub mod input;
pub mod output;
pub mod report;
pub mod resolver;

mod retriever;

pub use crate::retriever::{DEFAULT_OUTPUT_INTERVAL, Retriever, RetrieverConfig, RunSummary};
pub use api::{
    AffiliationClient, ClientConfig, MatchCandidate, MatchingType, MockClient, Organization,
    RorClient, SearchResponse,
};
pub use error::{Result, RorError};
pub use input::{AffiliationRecord, AffiliationSource};
pub use output::{COLUMNS, MatchKind, ResolvedAffiliation, ResultWriter, output_file_name};
pub use resolver::{Outcome, Resolution, Resolver, ResolverConfig, classify};
