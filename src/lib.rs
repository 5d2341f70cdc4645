//! # Chatstats
//!
//! A Rust library for parsing WhatsApp-style chat exports and computing
//! conversation analytics: message counts, personal records, funny moments,
//! and word frequencies.
//!
//! ## Overview
//!
//! Chat exports arrive as plain text, one header per message, in one of two
//! grammars:
//!
//! - **Format A** — `01/01/2024 10:00 - Alice: Bom dia`
//! - **Format B** — `[01/01/24, 10:00:00] Alice: Bom dia`
//!
//! Lines that match neither grammar are folded into the preceding message,
//! so multiline content survives parsing. On top of the parsed transcript
//! the library computes aggregate statistics (per-person, per-day, per-hour,
//! personal records, busiest day), samples "funny" moments, and ranks word
//! frequencies with Portuguese stop-word and verb-suffix filtering.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! let parser = TranscriptParser::new();
//! let messages = parser.parse_str(
//!     "01/01/2024 10:00 - Alice: Bom dia\n01/01/2024 10:01 - Bob: Bom dia",
//! );
//!
//! let report = build_report(&messages, &ReportOptions::new().with_seed(42));
//! assert_eq!(report.summary.total_messages, 2);
//! assert_eq!(report.summary.participants, 2);
//! ```
//!
//! ## Reading from a File
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = TranscriptParser::new();
//!     let messages = parser.parse("conversa.txt".as_ref())?;
//!
//!     let report = build_report(&messages, &ReportOptions::new());
//!     write_json(&report, "relatorio.json")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`TranscriptParser`]: the two header grammars plus
//!   multiline folding
//! - [`identity`] — [`IdentityMap`]: phone-number to display-name resolution
//! - [`stats`] — the analyses
//!   - [`MessageStats`] via [`aggregate()`](stats::aggregate()) — counts,
//!     records, busiest day
//!   - [`sample_moments`](stats::sample_moments) — random funny-moment picks
//!   - [`analyze()`](stats::analyze()) — ranked word frequencies
//! - [`filter`] — [`FilterConfig`], [`apply_filters`]
//! - [`report`] — [`Report`] assembly and JSON/CSV export
//! - [`cli`] — CLI types (behind the `cli` feature)
//! - [`error`] — unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] — convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod filter;
pub mod identity;
pub mod message;
pub mod parser;
pub mod report;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use filter::{FilterConfig, apply_filters};
pub use identity::{IdentityMap, normalize_digits};
pub use message::Message;
pub use parser::TranscriptParser;
pub use report::{
    Report, ReportOptions, Summary, build_report, hourly_averages, person_ranking, to_csv,
    to_json, write_csv, write_json,
};
pub use stats::{
    BusiestDay, CloudDensity, DailyRecord, FUNNY_KEYWORDS, Granularity, HourlyRecord,
    MessageStats, STOP_WORDS, WordCount, WordFrequencyConfig, WordFrequencyResult, aggregate,
    analyze, is_funny, period_keys, sample_moments, sample_moments_with,
};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Parsing
    pub use crate::identity::IdentityMap;
    pub use crate::parser::TranscriptParser;

    // Filtering
    pub use crate::filter::{FilterConfig, apply_filters};

    // Analyses
    pub use crate::stats::{
        CloudDensity, Granularity, MessageStats, WordFrequencyConfig, aggregate, analyze,
        sample_moments, sample_moments_with,
    };

    // Reports (assembly, string converters, and file writers)
    pub use crate::report::{
        Report, ReportOptions, build_report, person_ranking, to_csv, to_json, write_csv,
        write_json,
    };

    // CLI types
    #[cfg(feature = "cli")]
    pub use crate::cli::{ReportFormat, WordDensity, WordGrouping};
}
