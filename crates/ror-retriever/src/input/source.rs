//! Input sources and the records they produce.

use std::path::PathBuf;

/// Tokens read as missing values in tabular sources.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single input affiliation.
///
/// Tabular sources can contain empty cells; those are kept as `Missing` so
/// that record positions (and therefore flush points) stay aligned with the
/// source, but they are never sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AffiliationRecord {
    /// Free-text affiliation as read from the source.
    Text(String),
    /// Cell with no textual value.
    Missing,
}

impl AffiliationRecord {
    /// Build a record from a tabular cell, mapping missing-value tokens to `Missing`.
    pub fn from_cell(value: &str) -> Self {
        if Self::is_missing_value(value) {
            AffiliationRecord::Missing
        } else {
            AffiliationRecord::Text(value.to_string())
        }
    }

    /// Check if a cell value represents a missing value.
    pub fn is_missing_value(value: &str) -> bool {
        MISSING_TOKENS.contains(&value)
    }

    /// The text, if this record has any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AffiliationRecord::Text(s) => Some(s),
            AffiliationRecord::Missing => None,
        }
    }

    /// Strip newlines and surrounding whitespace.
    ///
    /// Returns `None` for missing records and for text that is empty once
    /// normalized. Whitespace-only strings are therefore skipped like
    /// missing values and never looked up, so they produce no output row.
    pub fn normalized(&self) -> Option<String> {
        let text = self.as_text()?.replace('\n', "");
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl From<&str> for AffiliationRecord {
    fn from(value: &str) -> Self {
        AffiliationRecord::Text(value.to_string())
    }
}

impl From<String> for AffiliationRecord {
    fn from(value: String) -> Self {
        AffiliationRecord::Text(value)
    }
}

/// Where affiliations come from. Exactly one source is used per run.
#[derive(Debug, Clone, PartialEq)]
pub enum AffiliationSource {
    /// Affiliations given inline, used verbatim.
    List(Vec<String>),
    /// A text file with one affiliation per line.
    File(PathBuf),
    /// A CSV or TSV file with an affiliation column.
    Data {
        path: PathBuf,
        /// Explicit column name; falls back to `Affiliation`/`affiliation`.
        column: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_newlines_and_whitespace() {
        let record = AffiliationRecord::from("  Dept. of Physics,\n University of Oslo \n");
        assert_eq!(
            record.normalized().as_deref(),
            Some("Dept. of Physics, University of Oslo")
        );
    }

    #[test]
    fn test_normalize_skips_blank_and_missing() {
        assert_eq!(AffiliationRecord::from(" \n").normalized(), None);
        assert_eq!(AffiliationRecord::Missing.normalized(), None);
    }

    #[test]
    fn test_from_cell() {
        assert_eq!(AffiliationRecord::from_cell(""), AffiliationRecord::Missing);
        assert_eq!(AffiliationRecord::from_cell("NaN"), AffiliationRecord::Missing);
        assert_eq!(AffiliationRecord::from_cell("NA"), AffiliationRecord::Missing);
        assert_eq!(
            AffiliationRecord::from_cell("CERN"),
            AffiliationRecord::Text("CERN".to_string())
        );
    }
}
