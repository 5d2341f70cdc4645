//! Phone-number identity resolution.
//!
//! WhatsApp exports label senders with whatever the exporting phone had: a
//! saved contact name, or a raw number like `+55 61 91234-5678`. The same
//! person can therefore appear under several spellings of one number.
//! [`IdentityMap`] maps numbers to display names by comparing digits only, so
//! formatting differences (spaces, dashes, country-code prefix style) all
//! resolve to the same entry.
//!
//! The table is an input, not built-in data: load it from a JSON object file
//! or build it from pairs. An empty map is valid and leaves every sender
//! label untouched.
//!
//! # Example
//!
//! ```
//! use chatstats::IdentityMap;
//!
//! let contacts = IdentityMap::from_pairs([("+55 61 1234-5678", "Alice")]);
//!
//! assert_eq!(contacts.resolve("556112345678"), "Alice");
//! assert_eq!(contacts.resolve("+5561 1234 5678"), "Alice");
//! assert_eq!(contacts.resolve("Bob"), "Bob");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Strips every non-ASCII-digit character from a token.
///
/// `"+55 (61) 1234-5678"` and `"556112345678"` normalize identically. A token
/// with no digits at all (a plain display name) normalizes to the empty
/// string, which never matches a map entry.
pub fn normalize_digits(token: &str) -> String {
    token.chars().filter(char::is_ascii_digit).collect()
}

/// Lookup table from normalized phone digits to display names.
///
/// Read-only after construction. [`resolve`](Self::resolve) is total: unknown
/// or digit-free tokens come back unchanged, so downstream statistics always
/// have a usable sender label.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    by_digits: HashMap<String, String>,
}

impl IdentityMap {
    /// Creates an empty map. Every token resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(phone, name)` pairs.
    ///
    /// Keys are digit-normalized on insertion. When two keys normalize to the
    /// same digit string, the later pair wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (phone, name) in pairs {
            let digits = normalize_digits(phone.as_ref());
            if !digits.is_empty() {
                map.by_digits.insert(digits, name.into());
            }
        }
        map
    }

    /// Parses a JSON object of `{"phone": "name"}` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use chatstats::IdentityMap;
    ///
    /// let contacts = IdentityMap::from_json_str(
    ///     r#"{"+55 61 9999-0001": "Alice", "+55 61 9999-0002": "Bob"}"#,
    /// )?;
    /// assert_eq!(contacts.len(), 2);
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(raw))
    }

    /// Reads a contacts file containing a JSON object of `{"phone": "name"}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Builder method to add a single contact.
    #[must_use]
    pub fn with_contact(mut self, phone: &str, name: impl Into<String>) -> Self {
        let digits = normalize_digits(phone);
        if !digits.is_empty() {
            self.by_digits.insert(digits, name.into());
        }
        self
    }

    /// Resolves a raw sender token to a display name.
    ///
    /// The token is digit-normalized and looked up; on a miss (or when the
    /// token carries no digits) the raw token is returned unchanged. Pure and
    /// infallible.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        let digits = normalize_digits(raw);
        if digits.is_empty() {
            return raw;
        }
        self.by_digits.get(&digits).map_or(raw, String::as_str)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.by_digits.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.by_digits.is_empty()
    }
}
