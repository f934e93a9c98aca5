//! Output row type with a fixed column schema.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::api::{MatchCandidate, MatchingType};

/// Output columns, in file order.
pub const COLUMNS: [&str; 10] = [
    "affiliation",
    "searchString_Affiliation",
    "ROR_Affiliation",
    "organizationLookupName_Affiliation",
    "country_Affiliation",
    "match_Affiliation",
    "chosen_Affiliation",
    "score",
    "numberOfResults_Affiliation",
    "valid",
];

/// What the `match_Affiliation` column reports for a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// Accepted candidate, labelled with the service's matching method.
    Matched(MatchingType),
    /// The service returned no candidates (or only excluded acronyms).
    NoResult,
    /// Candidates exist but none was selected.
    NoMatch,
    /// The lookup failed; only written when fetch errors are recorded.
    FetchError,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Matched(t) => write!(f, "{}", t),
            MatchKind::NoResult => write!(f, "No Result"),
            MatchKind::NoMatch => write!(f, "No Match"),
            MatchKind::FetchError => write!(f, "Fetch Error"),
        }
    }
}

/// One output row.
///
/// Every row has all columns; sentinel rows leave the candidate columns empty
/// and score `0.0`, so appends to the same file stay columnar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAffiliation {
    /// Normalized input affiliation.
    pub affiliation: String,

    #[serde(rename = "searchString_Affiliation")]
    pub search_string: String,

    #[serde(rename = "ROR_Affiliation")]
    pub ror_id: String,

    #[serde(rename = "organizationLookupName_Affiliation")]
    pub organization_name: String,

    #[serde(rename = "country_Affiliation")]
    pub country: String,

    #[serde(rename = "match_Affiliation", serialize_with = "display")]
    pub match_kind: MatchKind,

    #[serde(rename = "chosen_Affiliation", serialize_with = "title_case_opt")]
    pub chosen: Option<bool>,

    pub score: f64,

    /// Candidate count reported by the service, before any filtering.
    #[serde(rename = "numberOfResults_Affiliation")]
    pub number_of_results: usize,

    #[serde(serialize_with = "title_case")]
    pub valid: bool,
}

impl ResolvedAffiliation {
    /// Row for an accepted candidate.
    pub fn matched(affiliation: &str, candidate: &MatchCandidate, number_of_results: usize) -> Self {
        Self {
            affiliation: affiliation.to_string(),
            search_string: candidate.substring.replace('"', ""),
            ror_id: candidate.organization.id.clone(),
            organization_name: candidate.organization.name.clone(),
            country: candidate.organization.country_name().to_string(),
            match_kind: MatchKind::Matched(candidate.matching_type.clone()),
            chosen: Some(candidate.chosen),
            score: candidate.score,
            number_of_results,
            valid: true,
        }
    }

    /// Invalid row standing in for an affiliation without an accepted candidate.
    pub fn sentinel(affiliation: &str, match_kind: MatchKind, number_of_results: usize) -> Self {
        Self {
            affiliation: affiliation.to_string(),
            search_string: String::new(),
            ror_id: String::new(),
            organization_name: String::new(),
            country: String::new(),
            match_kind,
            chosen: None,
            score: 0.0,
            number_of_results,
            valid: false,
        }
    }
}

fn display<S: Serializer>(value: &MatchKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn title_case<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

fn title_case_opt<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => title_case(v, serializer),
        None => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Organization;

    #[test]
    fn test_matched_row_strips_quotes() {
        let candidate = MatchCandidate::new(
            "\"University of Oslo\"",
            0.9,
            MatchingType::CommonTerms,
            false,
            Organization::new("https://ror.org/01xtthb56", "University of Oslo", "Norway"),
        );

        let row = ResolvedAffiliation::matched("Univ. Oslo", &candidate, 3);
        assert_eq!(row.search_string, "University of Oslo");
        assert_eq!(row.country, "Norway");
        assert_eq!(row.match_kind.to_string(), "COMMON TERMS");
        assert_eq!(row.chosen, Some(false));
        assert_eq!(row.number_of_results, 3);
        assert!(row.valid);
    }

    #[test]
    fn test_sentinel_defaults() {
        let row = ResolvedAffiliation::sentinel("Nowhere Institute", MatchKind::NoMatch, 4);
        assert_eq!(row.match_kind.to_string(), "No Match");
        assert_eq!(row.chosen, None);
        assert_eq!(row.score, 0.0);
        assert_eq!(row.number_of_results, 4);
        assert!(!row.valid);
    }
}
