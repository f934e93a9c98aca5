//! Main Retriever struct: the sequential batch run.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::AffiliationClient;
use crate::error::Result;
use crate::input::AffiliationRecord;
use crate::output::{MatchKind, ResolvedAffiliation, ResultWriter};
use crate::report;
use crate::resolver::{Outcome, Resolver, ResolverConfig};

/// Default number of input records between output flushes.
pub const DEFAULT_OUTPUT_INTERVAL: usize = 20;

/// Configuration for a retrieval run.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Candidate selection settings.
    pub resolver: ResolverConfig,
    /// Input records between output flushes (at least 1).
    pub output_interval: usize,
    /// Print the candidate table for every affiliation.
    pub show_details: bool,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            output_interval: DEFAULT_OUTPUT_INTERVAL,
            show_details: false,
        }
    }
}

/// Counts from a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Output file.
    pub output: PathBuf,
    /// Input records, including skipped ones.
    pub inputs: usize,
    /// Records with no text to look up.
    pub skipped: usize,
    /// Lookups that failed (transport, HTTP status or malformed body).
    pub failed: usize,
    /// Accepted candidates written.
    pub accepted: usize,
    /// Rows written, including sentinel rows.
    pub rows: usize,
    /// Append operations on the output file.
    pub flushes: usize,
}

/// Resolves a list of affiliations and writes the results.
pub struct Retriever {
    resolver: Resolver,
    config: RetrieverConfig,
}

impl Retriever {
    /// Create a retriever with default configuration.
    pub fn new(client: impl AffiliationClient + 'static) -> Self {
        Self::with_config(client, RetrieverConfig::default())
    }

    /// Create a retriever with custom configuration.
    pub fn with_config(client: impl AffiliationClient + 'static, config: RetrieverConfig) -> Self {
        Self::from_shared(Arc::new(client), config)
    }

    /// Create a retriever around a client shared with other owners.
    pub fn from_shared(client: Arc<dyn AffiliationClient>, config: RetrieverConfig) -> Self {
        Self {
            resolver: Resolver::new(client, config.resolver.clone()),
            config,
        }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Resolve `records` one at a time, appending results to `output`.
    ///
    /// Candidate tables go to `console` when there is a single input or
    /// details were requested. Per-record lookup failures are logged and
    /// counted; file errors abort the run.
    pub fn run<W: Write>(
        &self,
        records: &[AffiliationRecord],
        output: impl AsRef<Path>,
        console: &mut W,
    ) -> Result<RunSummary> {
        let output = output.as_ref();
        let mut writer = ResultWriter::new(output, self.config.output_interval)?;
        let show_details = records.len() == 1 || self.config.show_details;

        if self.config.resolver.accept_max_score {
            info!("************** Best match is being found (may not be chosen by algorithm, score < 1.0)");
        }
        if self.config.resolver.exclude_acronyms {
            info!("************** Acronyms are not being considered in the results.");
        }

        let mut summary = RunSummary {
            output: output.to_path_buf(),
            inputs: records.len(),
            ..RunSummary::default()
        };

        for (i, record) in records.iter().enumerate() {
            let Some(affiliation) = record.normalized() else {
                summary.skipped += 1;
                continue;
            };

            if writer.is_flush_point(i) {
                info!("{} processed affiliation: {}", i, affiliation);
                writer.flush()?;
                info!("{} new RORs written to {}", summary.accepted, output.display());
            }

            match self.resolver.lookup(&affiliation) {
                Ok((response, resolution)) => {
                    if show_details && resolution.outcome != Outcome::NoResult {
                        if let Err(e) = report::write_candidates(console, &response.items) {
                            warn!("Could not print response table: {}", e);
                        }
                    }
                    summary.accepted += resolution.accepted();
                    writer.extend(resolution.rows);
                }
                Err(e) if e.is_per_record() => {
                    warn!("****************** HTTP Error: {}", e);
                    summary.failed += 1;
                    if self.config.resolver.record_fetch_errors {
                        writer.extend([ResolvedAffiliation::sentinel(
                            &affiliation,
                            MatchKind::FetchError,
                            0,
                        )]);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        writer.finish()?;
        info!("{} new RORs written to {}", summary.accepted, output.display());
        info!("{} {} RORs Found", output.display(), summary.accepted);

        summary.rows = writer.rows_written();
        summary.flushes = writer.flushes();
        Ok(summary)
    }
}
