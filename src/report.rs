//! Assembled reports and export to JSON and CSV.
//!
//! [`build_report`] runs every analysis over a transcript and packs the
//! results into a single serializable [`Report`]. Exporters follow the
//! to-string / write-to-file pairing: [`to_json`] / [`write_json`] and
//! [`to_csv`] / [`write_csv`].
//!
//! CSV output is a per-person table (semicolon delimiter); JSON output is
//! the full report, pretty-printed.

use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::Message;
use crate::error::Result;
use crate::stats::{self, MessageStats, WordFrequencyConfig, WordFrequencyResult};

/// Headline numbers for a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Parsed message count.
    pub total_messages: usize,
    /// Distinct senders.
    pub participants: usize,
    /// Distinct days with at least one message.
    pub active_days: usize,
    /// Messages per active day, rounded. Zero for an empty transcript.
    pub average_per_day: usize,
}

impl Summary {
    /// Derives the headline numbers from aggregated statistics.
    pub fn from_stats(stats: &MessageStats) -> Self {
        let active_days = stats.active_days();
        let average_per_day = if active_days == 0 {
            0
        } else {
            round_div(stats.total_messages, active_days)
        };

        Self {
            total_messages: stats.total_messages,
            participants: stats.participants(),
            active_days,
            average_per_day,
        }
    }
}

/// Everything the analyses produce, in one serializable bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Headline numbers.
    pub summary: Summary,
    /// Full aggregated statistics.
    pub stats: MessageStats,
    /// Average messages per hour slot across active days, rounded.
    pub hourly_average: [usize; 24],
    /// Sampled funny moments, at most ten.
    pub funny_moments: Vec<Message>,
    /// Ranked word frequencies.
    pub words: WordFrequencyResult,
}

/// Configuration for [`build_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Word-frequency settings.
    pub words: WordFrequencyConfig,
    /// Seed for the funny-moments sampler. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl ReportOptions {
    /// Creates the default options: full range, random sampling seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the word-frequency configuration.
    #[must_use]
    pub fn with_words(mut self, words: WordFrequencyConfig) -> Self {
        self.words = words;
        self
    }

    /// Builder method to fix the sampler seed, making reports reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Runs every analysis over the messages and assembles a [`Report`].
///
/// # Example
///
/// ```
/// use chatstats::{ReportOptions, TranscriptParser, build_report};
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str(
///     "01/01/2024 10:00 - Alice: Bom dia\n01/01/2024 10:01 - Bob: Bom dia",
/// );
///
/// let report = build_report(&messages, &ReportOptions::new().with_seed(42));
/// assert_eq!(report.summary.total_messages, 2);
/// assert_eq!(report.summary.participants, 2);
/// ```
pub fn build_report(messages: &[Message], options: &ReportOptions) -> Report {
    let stats = stats::aggregate(messages);

    let funny_moments = match options.seed {
        Some(seed) => stats::sample_moments_with(messages, &mut StdRng::seed_from_u64(seed)),
        None => stats::sample_moments(messages),
    };

    let words = stats::analyze(messages, &options.words);

    Report {
        summary: Summary::from_stats(&stats),
        hourly_average: hourly_averages(&stats),
        stats,
        funny_moments,
        words,
    }
}

/// Average messages per hour slot across active days, rounded.
///
/// All 24 slots are zero when the transcript is empty.
pub fn hourly_averages(stats: &MessageStats) -> [usize; 24] {
    let mut averages = [0usize; 24];
    let days = stats.active_days();
    if days == 0 {
        return averages;
    }

    for (hour, bucket) in stats.messages_per_hour.iter().enumerate() {
        averages[hour] = round_div(bucket.len(), days);
    }
    averages
}

/// Senders ranked by message count, descending; ties alphabetical.
pub fn person_ranking(stats: &MessageStats) -> Vec<(String, usize)> {
    let mut ranking: Vec<(String, usize)> = stats
        .messages_per_person
        .iter()
        .map(|(sender, count)| (sender.clone(), *count))
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranking
}

fn round_div(numerator: usize, denominator: usize) -> usize {
    (numerator as f64 / denominator as f64).round() as usize
}

// ============================================================================
// Export
// ============================================================================

const CSV_HEADER: [&str; 6] = [
    "Sender",
    "Messages",
    "Best day",
    "Best day messages",
    "Best hour",
    "Best hour messages",
];

/// Serializes the full report to pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the full report to a JSON file.
pub fn write_json(report: &Report, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Serializes the per-person table to CSV.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Sender`, `Messages`, `Best day`, `Best day messages`,
///   `Best hour`, `Best hour messages`
/// - Rows: ranking order (count descending, ties alphabetical)
/// - Encoding: UTF-8
pub fn to_csv(report: &Report) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(vec![]);

    writer.write_record(CSV_HEADER)?;
    for (sender, count) in person_ranking(&report.stats) {
        writer.write_record(person_record(&report.stats, &sender, count))?;
    }
    writer.flush()?;

    let buffer = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the per-person table to a CSV file.
pub fn write_csv(report: &Report, output_path: impl AsRef<Path>) -> Result<()> {
    let csv = to_csv(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}

fn person_record(stats: &MessageStats, sender: &str, count: usize) -> [String; 6] {
    let daily = stats.daily_record_per_person.get(sender);
    let hourly = stats.hourly_record_per_person.get(sender);

    [
        sender.to_string(),
        count.to_string(),
        daily.map(|r| r.date.clone()).unwrap_or_default(),
        daily.map(|r| r.count.to_string()).unwrap_or_default(),
        hourly.map(|r| format!("{:02}:00", r.hour)).unwrap_or_default(),
        hourly.map(|r| r.count.to_string()).unwrap_or_default(),
    ]
}
