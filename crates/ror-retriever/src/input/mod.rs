//! Affiliation input loading.

mod loader;
mod source;

pub use loader::{AFFILIATION_COLUMNS, delimiter_for, resolve_column};
pub use source::{AffiliationRecord, AffiliationSource};
