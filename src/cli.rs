//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ReportFormat`] - Export format options
//! - [`WordGrouping`] / [`WordDensity`] - Word-frequency options
//!
//! The option enums mirror library types without pulling clap into the
//! library surface; `From` conversions bridge the two:
//!
//! ```rust
//! use chatstats::cli::{WordDensity, WordGrouping};
//! use chatstats::{CloudDensity, Granularity};
//!
//! assert_eq!(Granularity::from(WordGrouping::Day), Granularity::Day);
//! assert_eq!(CloudDensity::from(WordDensity::Dense), CloudDensity::Dense);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::stats::{CloudDensity, Granularity};

/// Analyze WhatsApp-style chat exports: message statistics, funny
/// moments, and word frequencies.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats conversa.txt
    chatstats conversa.txt -o relatorio.json
    chatstats conversa.txt -o ranking.csv --format csv
    chatstats conversa.txt --contacts contatos.json --from Alice
    chatstats conversa.txt --after 2024-01-01 --before 2024-06-30
    chatstats conversa.txt --words-by day --density dense --seed 42")]
pub struct Args {
    /// Path to the exported chat transcript
    pub input: String,

    /// Write the report to this file (summary prints either way)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Report file format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,

    /// JSON file mapping phone numbers to display names
    #[arg(long, value_name = "FILE")]
    pub contacts: Option<String>,

    /// Keep only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep only messages from this sender
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Group word frequencies by month or by day
    #[arg(long, value_enum, default_value = "month")]
    pub words_by: WordGrouping,

    /// How many ranked words to keep
    #[arg(long, value_enum, default_value = "normal")]
    pub density: WordDensity,

    /// Restrict word frequencies to a single day of the range
    #[arg(long, value_name = "INDEX")]
    pub words_day: Option<usize>,

    /// Keep verb-like words in the frequency ranking
    #[arg(long)]
    pub keep_verbs: bool,

    /// Seed for the funny-moments sampler (reproducible reports)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// Report export formats.
///
/// - [`Json`](ReportFormat::Json) - Full report, pretty-printed
/// - [`Csv`](ReportFormat::Csv) - Per-person ranking table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Full report as a JSON document (default)
    #[default]
    Json,

    /// Per-person table with semicolon delimiter
    Csv,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv"]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "JSON"),
            ReportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Word-frequency grouping for the `--words-by` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordGrouping {
    /// Group periods by month (default)
    #[default]
    Month,

    /// Group periods by day
    Day,
}

impl From<WordGrouping> for Granularity {
    fn from(grouping: WordGrouping) -> Granularity {
        match grouping {
            WordGrouping::Month => Granularity::Month,
            WordGrouping::Day => Granularity::Day,
        }
    }
}

/// Ranking size for the `--density` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordDensity {
    /// Top 60 words (default)
    #[default]
    Normal,

    /// Top 150 words
    Dense,
}

impl From<WordDensity> for CloudDensity {
    fn from(density: WordDensity) -> CloudDensity {
        match density {
            WordDensity::Normal => CloudDensity::Normal,
            WordDensity::Dense => CloudDensity::Dense,
        }
    }
}
