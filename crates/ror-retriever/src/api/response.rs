//! Response schema of the ROR affiliation endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RorError, Result};

/// Body of `GET /organizations?affiliation=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of candidates the service found.
    pub number_of_results: usize,

    /// Ranked candidates.
    #[serde(default)]
    pub items: Vec<MatchCandidate>,
}

impl SearchResponse {
    /// Response with no candidates.
    pub fn empty() -> Self {
        Self {
            number_of_results: 0,
            items: Vec::new(),
        }
    }

    /// Response whose result count matches its candidate list.
    pub fn with_items(items: Vec<MatchCandidate>) -> Self {
        Self {
            number_of_results: items.len(),
            items,
        }
    }

    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| RorError::Parse(e.to_string()))
    }

    /// Number of candidates matched through acronym expansion.
    pub fn acronym_count(&self) -> usize {
        self.items.iter().filter(|c| c.matching_type.is_acronym()).count()
    }
}

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Part of the affiliation string that matched.
    pub substring: String,

    /// Match score between 0 and 1.
    pub score: f64,

    /// Method that produced the match.
    pub matching_type: MatchingType,

    /// Whether the service picked this candidate as its answer.
    pub chosen: bool,

    pub organization: Organization,
}

impl MatchCandidate {
    /// Create a candidate.
    pub fn new(
        substring: impl Into<String>,
        score: f64,
        matching_type: MatchingType,
        chosen: bool,
        organization: Organization,
    ) -> Self {
        Self {
            substring: substring.into(),
            score,
            matching_type,
            chosen,
            organization,
        }
    }
}

/// Registry record attached to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// ROR identifier, e.g. `https://ror.org/01ggx4157`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<Country>,
}

impl Organization {
    /// Create an organization record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: Some(Country {
                country_name: country.into(),
            }),
        }
    }

    /// Country name, empty when the record carries none.
    pub fn country_name(&self) -> &str {
        self.country.as_ref().map(|c| c.country_name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub country_name: String,
}

/// How the service matched a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchingType {
    Phrase,
    CommonTerms,
    Fuzzy,
    Heuristics,
    Acronym,
    Exact,
    /// Any method this client does not know about, kept verbatim.
    Other(String),
}

impl MatchingType {
    /// Wire name as sent by the API.
    pub fn as_str(&self) -> &str {
        match self {
            MatchingType::Phrase => "PHRASE",
            MatchingType::CommonTerms => "COMMON TERMS",
            MatchingType::Fuzzy => "FUZZY",
            MatchingType::Heuristics => "HEURISTICS",
            MatchingType::Acronym => "ACRONYM",
            MatchingType::Exact => "EXACT",
            MatchingType::Other(s) => s,
        }
    }

    pub fn is_acronym(&self) -> bool {
        matches!(self, MatchingType::Acronym)
    }
}

impl From<String> for MatchingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PHRASE" => MatchingType::Phrase,
            "COMMON TERMS" => MatchingType::CommonTerms,
            "FUZZY" => MatchingType::Fuzzy,
            "HEURISTICS" => MatchingType::Heuristics,
            "ACRONYM" => MatchingType::Acronym,
            "EXACT" => MatchingType::Exact,
            _ => MatchingType::Other(value),
        }
    }
}

impl From<MatchingType> for String {
    fn from(value: MatchingType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for MatchingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
