//! Parsed chat message type.
//!
//! This module provides [`Message`], the representation of a single transcript
//! entry produced by the parser. Every analysis in the crate (aggregation,
//! sampling, word frequency) consumes read-only slices of these.
//!
//! # Overview
//!
//! A message consists of:
//! - `sender`: display name after identity resolution
//! - `content`: message body, possibly spanning multiple lines
//! - `date`: local wall-clock timestamp taken literally from the transcript
//!
//! # Examples
//!
//! ```
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 0).unwrap();
//! let msg = Message::new("Alice", "Hello, world!", date);
//!
//! assert_eq!(msg.day_key(), "2024-01-15");
//! assert_eq!(msg.hour(), 10);
//! ```

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single parsed transcript message.
///
/// Created by [`TranscriptParser`](crate::parser::TranscriptParser) and
/// immutable afterwards. Timestamps are [`NaiveDateTime`]: exported chat logs
/// carry local wall-clock values with no zone information, and the statistics
/// (date keys, hour buckets) are defined over those literal calendar fields.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `String` | Display name of the message author (identity-resolved) |
/// | `content` | `String` | Text content; may contain newlines for multiline messages |
/// | `date` | `NaiveDateTime` | Local wall-clock timestamp, second precision |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    pub sender: String,

    /// Text content of the message.
    ///
    /// Multiline bodies are reconstructed by the parser with embedded `\n`.
    pub content: String,

    /// Local wall-clock timestamp, taken literally from the transcript.
    pub date: NaiveDateTime,
}

impl Message {
    /// Creates a new message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::Message;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let msg = Message::new("Alice", "Hello!", date);
    /// assert_eq!(msg.sender, "Alice");
    /// ```
    pub fn new(sender: impl Into<String>, content: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            date,
        }
    }

    // =========================================================================
    // Key derivation
    // =========================================================================

    /// Returns the zero-padded local date key, `YYYY-MM-DD`.
    ///
    /// This is the canonical key for daily grouping everywhere in the crate.
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Returns the zero-padded local month key, `YYYY-MM`.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Returns the local hour of day, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.date.hour()
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns the content length in characters (not bytes).
    ///
    /// Length heuristics (topics, funny moments) are defined over characters
    /// so accented text and emoji count as one each.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
