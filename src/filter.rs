//! Filter messages by date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for narrowing a transcript before analysis.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//!
//! # Examples
//!
//! ```
//! use chatstats::{FilterConfig, TranscriptParser, apply_filters};
//!
//! let parser = TranscriptParser::new();
//! let messages = parser.parse_str(
//!     "01/01/2024 10:00 - Alice: Oi\n\
//!      15/06/2024 10:00 - Bob: Olá\n\
//!      15/06/2024 10:05 - Alice: Tudo bem?",
//! );
//!
//! // Case-insensitive sender matching
//! let config = FilterConfig::new().with_sender("alice");
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 2);
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive for ASCII characters
//! - Date bounds are inclusive and cover the full day
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime};

use crate::Message;
use crate::error::ChatstatsError;

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use chatstats::FilterConfig;
///
/// # fn main() -> chatstats::Result<()> {
/// let combined = FilterConfig::new()
///     .with_sender("Alice")
///     .with_date_from("2024-06-01")?
///     .with_date_to("2024-12-31")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive), `YYYY-MM-DD`.
    ///
    /// The bound is placed at the start of the day so the whole day passes.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatstatsError> {
        let naive = parse_day(date_str)?;
        self.after = Some(naive.and_hms_opt(0, 0, 0).unwrap());
        Ok(self)
    }

    /// Sets the end date filter (inclusive), `YYYY-MM-DD`.
    ///
    /// The bound is placed at the end of the day so the whole day passes.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatstatsError> {
        let naive = parse_day(date_str)?;
        self.before = Some(naive.and_hms_opt(23, 59, 59).unwrap());
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// Matching is case-insensitive for ASCII characters, so `"Alice"`
    /// matches `"alice"` and `"ALICE"`.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the start timestamp directly.
    ///
    /// Use this when you already have a parsed [`NaiveDateTime`].
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    ///
    /// Use this when you already have a parsed [`NaiveDateTime`].
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate, ChatstatsError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatstatsError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns a new vector containing only messages that match all active
/// filters. If no filters are active, returns the original messages
/// unchanged.
///
/// # Examples
///
/// ```
/// use chatstats::{FilterConfig, TranscriptParser, apply_filters};
///
/// # fn main() -> chatstats::Result<()> {
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str(
///     "01/01/2024 10:00 - Alice: Velho\n15/06/2024 10:00 - Alice: Novo",
/// );
///
/// let config = FilterConfig::new().with_date_from("2024-06-01")?;
/// let filtered = apply_filters(messages, &config);
///
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].content, "Novo");
/// # Ok(())
/// # }
/// ```
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| {
            if let Some(ref from) = config.from {
                if !msg.sender.eq_ignore_ascii_case(from) {
                    return false;
                }
            }

            if config.after.is_some_and(|after| msg.date < after) {
                return false;
            }
            if config.before.is_some_and(|before| msg.date > before) {
                return false;
            }

            true
        })
        .collect()
}
