//! Statistics derived from parsed transcripts.
//!
//! Three independent analyses, each consuming `&[Message]`:
//!
//! | Entry point | Output |
//! |-------------|--------|
//! | [`aggregate()`] | [`MessageStats`]: counts, per-person records, busiest day |
//! | [`sample_moments()`] | random sample of keyword-matched "funny" messages |
//! | [`analyze()`] | [`WordFrequencyResult`]: ranked word frequencies over a period/day range |
//!
//! Every derivation recomputes from scratch; there is no incremental state.

pub mod aggregate;
pub mod moments;
pub mod words;

pub use aggregate::{BusiestDay, DailyRecord, HourlyRecord, MessageStats, aggregate};
pub use moments::{FUNNY_KEYWORDS, is_funny, sample_moments, sample_moments_with};
pub use words::{
    CloudDensity, Granularity, STOP_WORDS, WordCount, WordFrequencyConfig, WordFrequencyResult,
    analyze, period_keys,
};
