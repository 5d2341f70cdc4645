//! Single-pass message statistics.
//!
//! [`aggregate`] walks the message list once, filling count maps and
//! transient per-day buckets, then derives the per-person records and the
//! busiest day from those buckets. All grouping keys come from the messages'
//! local calendar fields (`YYYY-MM-DD` day keys, hour of day `0..=23`).
//!
//! Ties are deterministic: days and (date, hour) slots are visited in
//! ascending key order with strict `>` comparisons, so the earliest candidate
//! wins a tied record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Message;

/// Topics are content snippets strictly between these char counts.
const TOPIC_MIN_CHARS: usize = 20;
const TOPIC_MAX_CHARS: usize = 200;
/// At most this many topics are kept for the busiest day.
const MAX_TOPICS: usize = 5;

/// A person's single best day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Day key, `YYYY-MM-DD`.
    pub date: String,
    /// Messages sent by the person on that day.
    pub count: usize,
}

/// A person's single best (date, hour) slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Day key, `YYYY-MM-DD`.
    pub date: String,
    /// Hour of day, `0..=23`.
    pub hour: u32,
    /// Messages sent by the person in that slot.
    pub count: usize,
}

/// The group's busiest day and a sample of what was said on it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusiestDay {
    /// Day key, `YYYY-MM-DD`; empty when there are no messages.
    pub date: String,
    /// Total messages on that day.
    pub count: usize,
    /// Up to 5 content snippets from that day, 21 to 199 chars, in
    /// transcript order.
    pub topics: Vec<String>,
}

/// Aggregate statistics over a parsed transcript.
///
/// Produced by [`aggregate`]. The invariant
/// `sum(messages_per_person) == total_messages == sum(messages_per_day)`
/// holds by construction. `Default` is the well-defined empty aggregate
/// (zero counts, empty maps, 24 empty hour buckets).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageStats {
    /// Total number of messages.
    pub total_messages: usize,

    /// Day key → message count, ascending by date.
    pub messages_per_day: BTreeMap<String, usize>,

    /// Display name → message count.
    pub messages_per_person: BTreeMap<String, usize>,

    /// Hour of day → one day key per message in that hour.
    ///
    /// All 24 buckets always exist, so averaging never hits a missing key.
    /// Consumers divide bucket length by the number of active days; see
    /// [`hourly_averages`](crate::report::hourly_averages).
    pub messages_per_hour: [Vec<String>; 24],

    /// Each person's best day.
    pub daily_record_per_person: BTreeMap<String, DailyRecord>,

    /// Each person's best (date, hour) slot.
    pub hourly_record_per_person: BTreeMap<String, HourlyRecord>,

    /// The single busiest day, with topic snippets.
    pub busiest_day: BusiestDay,
}

impl MessageStats {
    /// Number of distinct senders.
    pub fn participants(&self) -> usize {
        self.messages_per_person.len()
    }

    /// Number of distinct days with at least one message.
    pub fn active_days(&self) -> usize {
        self.messages_per_day.len()
    }
}

/// Per-day working state, discarded once stats are derived.
#[derive(Default)]
struct DayBucket {
    count: usize,
    by_person: BTreeMap<String, usize>,
    /// Indices into the input slice, in input order.
    message_indices: Vec<usize>,
}

/// Computes [`MessageStats`] over an ordered message slice.
///
/// Empty input yields the empty aggregate; callers dividing by day or
/// participant counts must guard for zero themselves.
///
/// # Example
///
/// ```
/// use chatstats::{TranscriptParser, aggregate};
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str(
///     "01/01/2024 10:00 - Alice: Hello world\n01/01/2024 10:01 - Bob: Hi there",
/// );
/// let stats = aggregate(&messages);
///
/// assert_eq!(stats.total_messages, 2);
/// assert_eq!(stats.messages_per_person["Alice"], 1);
/// assert_eq!(stats.messages_per_day["2024-01-01"], 2);
/// ```
pub fn aggregate(messages: &[Message]) -> MessageStats {
    let mut stats = MessageStats {
        total_messages: messages.len(),
        ..MessageStats::default()
    };

    let mut daily: BTreeMap<String, DayBucket> = BTreeMap::new();
    let mut hourly: BTreeMap<(String, u32), BTreeMap<String, usize>> = BTreeMap::new();

    for (index, msg) in messages.iter().enumerate() {
        let day = msg.day_key();
        let hour = msg.hour();

        *stats
            .messages_per_person
            .entry(msg.sender.clone())
            .or_insert(0) += 1;
        *stats.messages_per_day.entry(day.clone()).or_insert(0) += 1;
        stats.messages_per_hour[hour as usize].push(day.clone());

        let bucket = daily.entry(day.clone()).or_default();
        bucket.count += 1;
        *bucket.by_person.entry(msg.sender.clone()).or_insert(0) += 1;
        bucket.message_indices.push(index);

        *hourly
            .entry((day, hour))
            .or_default()
            .entry(msg.sender.clone())
            .or_insert(0) += 1;
    }

    // Best day per person: ascending date order, strict >, earliest wins.
    for (date, bucket) in &daily {
        for (person, &count) in &bucket.by_person {
            stats
                .daily_record_per_person
                .entry(person.clone())
                .and_modify(|record| {
                    if count > record.count {
                        record.date = date.clone();
                        record.count = count;
                    }
                })
                .or_insert_with(|| DailyRecord {
                    date: date.clone(),
                    count,
                });
        }
    }

    // Best (date, hour) slot per person, same tie rule over slot order.
    for ((date, hour), by_person) in &hourly {
        for (person, &count) in by_person {
            stats
                .hourly_record_per_person
                .entry(person.clone())
                .and_modify(|record| {
                    if count > record.count {
                        record.date = date.clone();
                        record.hour = *hour;
                        record.count = count;
                    }
                })
                .or_insert_with(|| HourlyRecord {
                    date: date.clone(),
                    hour: *hour,
                    count,
                });
        }
    }

    let mut busiest = BusiestDay::default();
    for (date, bucket) in &daily {
        if bucket.count > busiest.count {
            busiest.date = date.clone();
            busiest.count = bucket.count;
        }
    }
    if let Some(bucket) = daily.get(&busiest.date) {
        busiest.topics = bucket
            .message_indices
            .iter()
            .map(|&index| &messages[index])
            .filter(|msg| {
                let chars = msg.char_count();
                chars > TOPIC_MIN_CHARS && chars < TOPIC_MAX_CHARS
            })
            .take(MAX_TOPICS)
            .map(|msg| msg.content.clone())
            .collect();
    }
    stats.busiest_day = busiest;

    stats
}
