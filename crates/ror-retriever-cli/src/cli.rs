//! CLI argument definitions using clap.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use ror_retriever::api::DEFAULT_API_URL;
use ror_retriever::{
    AffiliationSource, ClientConfig, DEFAULT_OUTPUT_INTERVAL, ResolverConfig, RetrieverConfig,
};

/// Two-letter short flags clap cannot express, and their long forms.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-af", "--affiliationFilename"),
    ("-ad", "--affiliationData"),
    ("-ac", "--affiliationColumn"),
];

/// Search organization names and affiliations for RORs using the ROR Affiliation Strategy
#[derive(Parser, Debug)]
#[command(name = "ror-retriever")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["affiliation_list", "affiliation_filename", "affiliation_data"])
))]
pub struct Cli {
    /// A list of "affiliations in quotes"
    #[arg(short = 'a', long = "affiliationList", num_args = 0.., value_name = "AFFILIATION")]
    pub affiliation_list: Option<Vec<String>>,

    /// A file with one affiliation per line (also -af)
    #[arg(long = "affiliationFilename", value_name = "FILE")]
    pub affiliation_filename: Option<PathBuf>,

    /// Data file (tsv, csv) with an Affiliation/affiliation column (also -ad)
    #[arg(long = "affiliationData", value_name = "FILE")]
    pub affiliation_data: Option<PathBuf>,

    /// Name of the affiliation column in the data file (also -ac)
    #[arg(long = "affiliationColumn", value_name = "COLUMN", requires = "affiliation_data")]
    pub affiliation_column: Option<String>,

    /// Exclude acronym matches
    #[arg(long = "noacronyms")]
    pub no_acronyms: bool,

    /// Accept max score if no result chosen by ROR algorithm (more results and noise)
    #[arg(long = "max")]
    pub match_max: bool,

    /// Show detailed response data (automatic for one affiliation)
    #[arg(long = "details")]
    pub show_details: bool,

    /// Output results update interval for batch processing
    #[arg(short = 'o', long = "outputInterval", default_value_t = DEFAULT_OUTPUT_INTERVAL, value_parser = parse_interval)]
    pub output_interval: usize,

    /// Logging level
    #[arg(long = "loglevel", default_value = "info")]
    pub log_level: LogLevel,

    /// Log file (will overwrite if exists)
    #[arg(long = "logto", value_name = "FILE")]
    pub log_to: Option<PathBuf>,

    /// Write a "Fetch Error" row for failed lookups instead of dropping them
    #[arg(long = "record-fetch-errors")]
    pub record_fetch_errors: bool,

    /// Directory for the output file
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// ROR organizations endpoint
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value = "30")]
    pub timeout: u64,
}

impl Cli {
    /// The single input source selected on the command line.
    pub fn source(&self) -> AffiliationSource {
        if let Some(ref path) = self.affiliation_data {
            AffiliationSource::Data {
                path: path.clone(),
                column: self.affiliation_column.clone(),
            }
        } else if let Some(ref path) = self.affiliation_filename {
            AffiliationSource::File(path.clone())
        } else {
            AffiliationSource::List(self.affiliation_list.clone().unwrap_or_default())
        }
    }

    pub fn retriever_config(&self) -> RetrieverConfig {
        RetrieverConfig {
            resolver: ResolverConfig {
                exclude_acronyms: self.no_acronyms,
                accept_max_score: self.match_max,
                record_fetch_errors: self.record_fetch_errors,
            },
            output_interval: self.output_interval,
            show_details: self.show_details,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Rewrite `-af`, `-ad` and `-ac` to their long forms so clap can parse them.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.into();
            LEGACY_FLAGS
                .iter()
                .find(|(short, _)| arg.as_os_str() == *short)
                .map(|(_, long)| OsString::from(*long))
                .unwrap_or(arg)
        })
        .collect()
}

fn parse_interval(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("output interval must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Logging verbosity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            _ => Err(format!("Unknown log level: {}. Use debug, info, or warning.", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warning => write!(f, "warning"),
        }
    }
}
