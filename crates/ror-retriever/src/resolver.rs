//! Affiliation resolution: fetch candidates and decide which to accept.

use std::sync::Arc;

use tracing::debug;

use crate::api::{AffiliationClient, MatchCandidate, SearchResponse};
use crate::error::Result;
use crate::output::{MatchKind, ResolvedAffiliation};

/// Selection settings for [`Resolver`].
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Drop candidates found through acronym expansion.
    pub exclude_acronyms: bool,

    /// Accept every candidate with the top score instead of only those the
    /// service marked as chosen.
    pub accept_max_score: bool,

    /// Write a "Fetch Error" row for failed lookups instead of dropping them.
    pub record_fetch_errors: bool,
}

/// How a response was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No usable candidates; a "No Result" row was produced.
    NoResult,
    /// This many candidates were accepted.
    Matched(usize),
    /// Candidates exist but none was selected; a "No Match" row was produced.
    NoMatch,
}

/// Classified response for one affiliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Output rows, never empty.
    pub rows: Vec<ResolvedAffiliation>,
}

impl Resolution {
    /// Number of accepted candidates.
    pub fn accepted(&self) -> usize {
        match self.outcome {
            Outcome::Matched(n) => n,
            _ => 0,
        }
    }
}

/// Resolves affiliation strings through an [`AffiliationClient`].
pub struct Resolver {
    client: Arc<dyn AffiliationClient>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(client: Arc<dyn AffiliationClient>, config: ResolverConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Fetch candidates for a normalized affiliation.
    ///
    /// The raw response is returned alongside its classification so callers
    /// can show every candidate, not just accepted ones.
    pub fn lookup(&self, affiliation: &str) -> Result<(SearchResponse, Resolution)> {
        let response = self.client.search(affiliation)?;
        let resolution = classify(affiliation, &response, &self.config);
        Ok((response, resolution))
    }
}

/// Turn a search response into output rows.
pub fn classify(affiliation: &str, response: &SearchResponse, config: &ResolverConfig) -> Resolution {
    if response.number_of_results == 0 {
        return no_result(affiliation);
    }

    let all_acronyms = !response.items.is_empty() && response.acronym_count() == response.items.len();
    if config.exclude_acronyms && all_acronyms {
        return no_result(affiliation);
    }

    let candidates: Vec<&MatchCandidate> = response
        .items
        .iter()
        .filter(|c| !(config.exclude_acronyms && c.matching_type.is_acronym()))
        .collect();

    let selected: Vec<&MatchCandidate> = if config.accept_max_score {
        let max = candidates.iter().map(|c| c.score).fold(f64::NEG_INFINITY, f64::max);
        candidates.into_iter().filter(|c| c.score == max).collect()
    } else {
        candidates.into_iter().filter(|c| c.chosen).collect()
    };

    if selected.is_empty() {
        return Resolution {
            outcome: Outcome::NoMatch,
            rows: vec![ResolvedAffiliation::sentinel(
                affiliation,
                MatchKind::NoMatch,
                response.number_of_results,
            )],
        };
    }

    let rows: Vec<ResolvedAffiliation> = selected
        .iter()
        .map(|c| {
            debug!("{} <{}> {}", affiliation, c.substring, c.organization.name);
            ResolvedAffiliation::matched(affiliation, c, response.number_of_results)
        })
        .collect();

    Resolution {
        outcome: Outcome::Matched(rows.len()),
        rows,
    }
}

fn no_result(affiliation: &str) -> Resolution {
    Resolution {
        outcome: Outcome::NoResult,
        rows: vec![ResolvedAffiliation::sentinel(affiliation, MatchKind::NoResult, 0)],
    }
}
