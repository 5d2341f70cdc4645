//! WhatsApp-style transcript parser.
//!
//! Exports come in two line shapes, both day-first:
//!
//! - Format A: `11/11/2025 06:48 - Sender: Message`
//! - Format B: `[11/11/25, 06:48] Sender: Message` (comma optional, 2- or
//!   4-digit year)
//!
//! Lines that match neither shape are continuations of the previous message
//! (multiline bodies) or pre-header boilerplate such as the encryption
//! notice, which has no `Sender:` segment and is dropped. Parsing is total:
//! any string input yields a (possibly empty) message list, never an error.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

use crate::Message;
use crate::error::Result;
use crate::identity::IdentityMap;

/// `11/11/2025 06:48 - Sender: Message` (4-digit year, optional seconds).
const FORMAT_A_PATTERN: &str =
    r"^(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2}(?::\d{2})?)\s*-\s*([^:]+):\s*(.*)$";

/// `[11/11/25, 06:48] Sender: Message` (2- or 4-digit year, comma optional).
const FORMAT_B_PATTERN: &str =
    r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?)\]\s*([^:]+):\s*(.*)$";

/// The data carried by a message-start line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Local wall-clock timestamp, fields taken literally from the text.
    pub date: NaiveDateTime,
    /// Raw sender token, trimmed, not yet identity-resolved.
    pub sender: String,
    /// Content on the header line itself, trimmed.
    pub content: String,
}

/// Classification of a single trimmed transcript line.
///
/// The two grammars are tried in fixed order, A before B. A line whose shape
/// matches but whose calendar values are invalid (`99/99/2024`) is `NoMatch`,
/// which keeps the parser total over arbitrary text.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch {
    /// Dash-separated header, e.g. `11/11/2025 06:48 - Alice: oi`.
    FormatA(Header),
    /// Bracketed header, e.g. `[11/11/25, 06:48] Alice: oi`.
    FormatB(Header),
    /// Continuation line or noise.
    NoMatch,
}

/// Parser for WhatsApp-style TXT transcripts.
///
/// Holds the compiled line grammars and the identity table used to resolve
/// phone-number senders to display names.
///
/// # Example
///
/// ```rust
/// use chatstats::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str("01/01/2024 10:00 - Alice: Hello world");
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].sender, "Alice");
/// assert_eq!(messages[0].content, "Hello world");
/// ```
pub struct TranscriptParser {
    identities: IdentityMap,
    format_a: Regex,
    format_b: Regex,
}

impl TranscriptParser {
    /// Creates a parser with an empty identity table.
    pub fn new() -> Self {
        Self::with_identities(IdentityMap::new())
    }

    /// Creates a parser that resolves senders through the given table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::{IdentityMap, TranscriptParser};
    ///
    /// let contacts = IdentityMap::from_pairs([("+55 61 9123-4567", "Alice")]);
    /// let parser = TranscriptParser::with_identities(contacts);
    ///
    /// let messages = parser.parse_str("01/01/2024 10:00 - +55 61 9123-4567: oi");
    /// assert_eq!(messages[0].sender, "Alice");
    /// ```
    pub fn with_identities(identities: IdentityMap) -> Self {
        Self {
            identities,
            format_a: Regex::new(FORMAT_A_PATTERN).unwrap(),
            format_b: Regex::new(FORMAT_B_PATTERN).unwrap(),
        }
    }

    /// Returns the identity table in use.
    pub fn identities(&self) -> &IdentityMap {
        &self.identities
    }

    /// Classifies one trimmed line against the two grammars.
    ///
    /// Exposed so the line grammars can be exercised independently of the
    /// accumulation state machine.
    pub fn classify(&self, line: &str) -> LineMatch {
        if let Some(caps) = self.format_a.captures(line) {
            if let Some(header) = header_from_captures(&caps) {
                return LineMatch::FormatA(header);
            }
        }
        if let Some(caps) = self.format_b.captures(line) {
            if let Some(header) = header_from_captures(&caps) {
                return LineMatch::FormatB(header);
            }
        }
        LineMatch::NoMatch
    }

    /// Parses a whole transcript string into ordered messages.
    ///
    /// Total over any input. Blank lines are skipped; non-header lines before
    /// the first header are discarded; non-header lines after a header are
    /// folded into the current message with a `\n` separator; the trailing
    /// message is emitted at end of input. Output order is input order.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        let mut messages = Vec::new();
        let mut current: Option<Message> = None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            match self.classify(line) {
                LineMatch::FormatA(header) | LineMatch::FormatB(header) => {
                    if let Some(done) = current.take() {
                        messages.push(done);
                    }
                    let sender = self.identities.resolve(&header.sender).to_string();
                    current = Some(Message::new(sender, header.content, header.date));
                }
                LineMatch::NoMatch => {
                    if let Some(msg) = current.as_mut() {
                        msg.content.push('\n');
                        msg.content.push_str(line);
                    }
                    // No header seen yet: export boilerplate, dropped.
                }
            }
        }

        if let Some(done) = current {
            messages.push(done);
        }

        messages
    }

    /// Reads a transcript file and parses it.
    ///
    /// The only failure mode is the file read itself.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`Header`] from grammar captures, or `None` when the calendar
/// values don't form a real date/time.
fn header_from_captures(caps: &Captures) -> Option<Header> {
    let date = build_datetime(caps.get(1)?.as_str(), caps.get(2)?.as_str())?;
    Some(Header {
        date,
        sender: caps.get(3)?.as_str().trim().to_string(),
        content: caps.get(4)?.as_str().trim().to_string(),
    })
}

/// Parses `D/M/Y` + `H:M(:S)` text into a wall-clock timestamp.
///
/// Dates are day-first. Two-digit years mean 2000+YY. Seconds default to 0.
fn build_datetime(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let mut date_parts = date_str.splitn(3, '/');
    let day: u32 = date_parts.next()?.parse().ok()?;
    let month: u32 = date_parts.next()?.parse().ok()?;
    let year_str = date_parts.next()?;
    let mut year: i32 = year_str.parse().ok()?;
    if year_str.len() == 2 {
        year += 2000;
    }

    let mut time_parts = time_str.splitn(3, ':');
    let hour: u32 = time_parts.next()?.parse().ok()?;
    let minute: u32 = time_parts.next()?.parse().ok()?;
    let second: u32 = match time_parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}
