//! Resolved affiliation rows and the incremental TSV writer.

mod record;
mod writer;

pub use record::{COLUMNS, MatchKind, ResolvedAffiliation};
pub use writer::{ResultWriter, output_file_name};
