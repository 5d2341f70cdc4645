//! Word-frequency analysis over period and day ranges.
//!
//! Messages are grouped into periods (months or days), a contiguous index
//! range of periods is selected, and the content inside it is tokenized and
//! ranked. An optional day index narrows the selection to a single day, the
//! way a day slider steps through the range.
//!
//! Tokenization, in order: lowercase, strip URLs, replace everything except
//! word characters and accented Latin letters with spaces, split on
//! whitespace. Tokens shorter than 4 chars, tokens in [`STOP_WORDS`], and
//! (by default) tokens with Portuguese verb-like suffixes are discarded.
//! The remainder is counted and ranked count-descending, ties alphabetical.

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;

/// Tokens shorter than this are never counted.
const MIN_TOKEN_CHARS: usize = 4;

/// Portuguese function words plus WhatsApp export boilerplate vocabulary.
///
/// The boilerplate entries (`mídia`, `oculta`, `apagada`, group-event verbs)
/// keep system messages out of the ranking without a separate filter.
pub const STOP_WORDS: &[&str] = &[
    "a", "o", "e", "é", "de", "da", "do", "em", "um", "uma", "os", "as", "para", "por", "com",
    "no", "na", "dos", "das", "ao", "à", "pelo", "pela", "se", "que", "ou", "mas", "quando", "já",
    "só", "mais", "não", "também", "muito", "vai", "vou", "vc", "q", "n", "aqui", "lá", "sim",
    "então", "bem", "como", "ela", "ele", "eu", "tu", "nós", "esse", "essa", "isso", "está",
    "ser", "ter", "fazer", "pode", "vamos", "foi", "são", "tem", "tinha", "https", "www", "br",
    "http", "mídia", "oculta", "grupo", "usando", "link", "entrou", "saiu", "mudou", "adicionou",
    "removeu", "criou", "mensagem", "apagada",
];

/// Verb-like suffixes stripped by default: gerund, participle (with plurals),
/// `-mente` adverbs. Infinitive endings are checked separately.
const VERB_SUFFIXES: &[&str] = &[
    "ando", "endo", "indo", "ados", "adas", "idos", "idas", "ado", "ada", "ido", "ida", "mente",
];

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Period grouping granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Group by `YYYY-MM`.
    #[default]
    Month,
    /// Group by `YYYY-MM-DD`.
    Day,
}

/// How many ranked words to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudDensity {
    /// Top 60.
    #[default]
    Normal,
    /// Top 150.
    Dense,
}

impl CloudDensity {
    /// Maximum ranked words kept for this density.
    pub fn max_words(self) -> usize {
        match self {
            CloudDensity::Normal => 60,
            CloudDensity::Dense => 150,
        }
    }
}

/// Configuration for [`analyze`].
///
/// # Example
///
/// ```
/// use chatstats::{CloudDensity, Granularity, WordFrequencyConfig};
///
/// let config = WordFrequencyConfig::new()
///     .with_granularity(Granularity::Day)
///     .with_density(CloudDensity::Dense)
///     .with_period_range(0, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequencyConfig {
    /// Period bucketing for range selection.
    pub granularity: Granularity,
    /// Ranking size.
    pub density: CloudDensity,
    /// Discard tokens with verb-like suffixes. On by default.
    pub strip_verb_forms: bool,
    /// Inclusive period index range; `None` selects every period.
    pub period_range: Option<(usize, usize)>,
    /// Restrict to a single day (index into the selected range's day list).
    pub day_index: Option<usize>,
}

impl Default for WordFrequencyConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            density: CloudDensity::Normal,
            strip_verb_forms: true,
            period_range: None,
            day_index: None,
        }
    }
}

impl WordFrequencyConfig {
    /// Creates the default configuration: all months, top 60, verb stripping on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the grouping granularity.
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Builder method to set the ranking size.
    #[must_use]
    pub fn with_density(mut self, density: CloudDensity) -> Self {
        self.density = density;
        self
    }

    /// Builder method to toggle verb-suffix stripping.
    #[must_use]
    pub fn with_strip_verb_forms(mut self, strip: bool) -> Self {
        self.strip_verb_forms = strip;
        self
    }

    /// Builder method to select an inclusive period index range.
    ///
    /// Indices refer to [`period_keys`] order and are clamped to valid
    /// bounds; an empty selection yields an empty result.
    #[must_use]
    pub fn with_period_range(mut self, start: usize, end: usize) -> Self {
        self.period_range = Some((start, end));
        self
    }

    /// Builder method to narrow the selection to one day of the range.
    ///
    /// The index points into [`WordFrequencyResult::days`] and is clamped to
    /// its last entry.
    #[must_use]
    pub fn with_day_index(mut self, index: usize) -> Self {
        self.day_index = Some(index);
        self
    }
}

/// One ranked word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// Lowercased token.
    pub word: String,
    /// Occurrences within the selected range.
    pub count: usize,
}

/// Ranked words plus the context they were computed over.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordFrequencyResult {
    /// Count-descending ranking, ties alphabetical, truncated per density.
    pub words: Vec<WordCount>,
    /// Human-readable description of the active day or period span,
    /// e.g. `09/03/2025` or `Janeiro 2025 a Março 2025`.
    pub label: String,
    /// Ordered day keys available inside the selected periods.
    pub days: Vec<String>,
}

/// Returns the ordered, distinct period keys present in the messages.
///
/// This is the index domain for
/// [`with_period_range`](WordFrequencyConfig::with_period_range).
pub fn period_keys(messages: &[Message], granularity: Granularity) -> Vec<String> {
    let keys: BTreeSet<String> = messages
        .iter()
        .map(|msg| period_key(msg, granularity))
        .collect();
    keys.into_iter().collect()
}

/// Computes the ranked word frequencies for the configured range.
///
/// Empty input, or a range that selects no periods, yields the empty result.
///
/// # Example
///
/// ```
/// use chatstats::{TranscriptParser, WordFrequencyConfig, analyze};
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str(
///     "01/01/2024 10:00 - Alice: futebol domingo\n01/01/2024 10:01 - Bob: futebol sim",
/// );
///
/// let result = analyze(&messages, &WordFrequencyConfig::new());
/// assert_eq!(result.words[0].word, "futebol");
/// assert_eq!(result.words[0].count, 2);
/// assert_eq!(result.label, "Janeiro 2024");
/// ```
pub fn analyze(messages: &[Message], config: &WordFrequencyConfig) -> WordFrequencyResult {
    let periods = period_keys(messages, config.granularity);
    if periods.is_empty() {
        return WordFrequencyResult::default();
    }

    let (start, end) = config.period_range.unwrap_or((0, periods.len() - 1));
    let end = end.min(periods.len() - 1);
    if start > end {
        return WordFrequencyResult::default();
    }
    let selected = &periods[start..=end];
    let selected_set: BTreeSet<&str> = selected.iter().map(String::as_str).collect();

    let in_range: Vec<&Message> = messages
        .iter()
        .filter(|msg| selected_set.contains(period_key(msg, config.granularity).as_str()))
        .collect();

    let days: Vec<String> = {
        let keys: BTreeSet<String> = in_range.iter().map(|msg| msg.day_key()).collect();
        keys.into_iter().collect()
    };

    let (scoped, label) = match config.day_index {
        Some(index) if !days.is_empty() => {
            let day = &days[index.min(days.len() - 1)];
            let scoped: Vec<&Message> = in_range
                .iter()
                .copied()
                .filter(|msg| msg.day_key() == *day)
                .collect();
            (scoped, day_label(day))
        }
        _ => {
            let label = range_label(selected, config.granularity);
            (in_range, label)
        }
    };

    let url_re = Regex::new(r"https?://\S+").unwrap();
    // ASCII word chars plus the Latin-1 accented range; everything else
    // (punctuation, emoji) becomes a token boundary.
    let junk_re = Regex::new(r"[^0-9A-Za-z_À-ÿ\s]").unwrap();
    let stop: HashSet<&str> = STOP_WORDS.iter().copied().collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for msg in scoped {
        let lowered = msg.content.to_lowercase();
        let without_urls = url_re.replace_all(&lowered, "");
        let cleaned = junk_re.replace_all(&without_urls, " ");
        for token in cleaned.split_whitespace() {
            if token.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }
            if stop.contains(token) {
                continue;
            }
            if config.strip_verb_forms && has_verb_suffix(token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(config.density.max_words());

    WordFrequencyResult { words, label, days }
}

fn period_key(msg: &Message, granularity: Granularity) -> String {
    match granularity {
        Granularity::Month => msg.month_key(),
        Granularity::Day => msg.day_key(),
    }
}

fn has_verb_suffix(token: &str) -> bool {
    VERB_SUFFIXES.iter().any(|suffix| token.ends_with(suffix))
        || token.ends_with("ar")
        || token.ends_with("er")
        || token.ends_with("ir")
}

/// `2025-03` → `Março 2025`; malformed keys pass through unchanged.
fn month_label(key: &str) -> String {
    let mut parts = key.splitn(2, '-');
    let (Some(year), Some(month)) = (parts.next(), parts.next()) else {
        return key.to_string();
    };
    month
        .parse::<usize>()
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|index| MONTH_NAMES.get(index))
        .map_or_else(|| key.to_string(), |name| format!("{name} {year}"))
}

/// `2025-03-09` → `09/03/2025`; malformed keys pass through unchanged.
fn day_label(key: &str) -> String {
    let parts: Vec<&str> = key.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}/{month}/{year}"),
        _ => key.to_string(),
    }
}

fn period_label(key: &str, granularity: Granularity) -> String {
    match granularity {
        Granularity::Month => month_label(key),
        Granularity::Day => day_label(key),
    }
}

fn range_label(selected: &[String], granularity: Granularity) -> String {
    match selected {
        [] => String::new(),
        [only] => period_label(only, granularity),
        [first, .., last] => format!(
            "{} a {}",
            period_label(first, granularity),
            period_label(last, granularity)
        ),
    }
}
