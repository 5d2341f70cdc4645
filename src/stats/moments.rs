//! Random sampling of "funny" messages.
//!
//! A message qualifies when it contains one of [`FUNNY_KEYWORDS`]
//! (case-insensitive substring) and its content is strictly between 30 and
//! 300 characters, long enough to carry context and short enough to display.
//! From the qualifying set a uniform random subset of at most 10 is drawn by
//! shuffling and truncating.
//!
//! [`sample_moments_with`] takes the RNG as an argument, so callers wanting
//! reproducible output pass a seeded [`rand::rngs::StdRng`].

use rand::Rng;
use rand::seq::SliceRandom;

use crate::Message;

/// Laughter markers and slang that flag a message as a candidate.
///
/// Matched case-insensitively as substrings against the content.
pub const FUNNY_KEYWORDS: &[&str] = &[
    "kkk",
    "haha",
    "rsrs",
    "lol",
    "😂",
    "🤣",
    "😆",
    "mano",
    "cara",
    "hilário",
    "engraçado",
];

const MIN_CONTENT_CHARS: usize = 30;
const MAX_CONTENT_CHARS: usize = 300;
const MAX_MOMENTS: usize = 10;

/// Returns `true` if the message qualifies as a funny-moment candidate.
pub fn is_funny(msg: &Message) -> bool {
    let chars = msg.char_count();
    if chars <= MIN_CONTENT_CHARS || chars >= MAX_CONTENT_CHARS {
        return false;
    }
    let lowered = msg.content.to_lowercase();
    FUNNY_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Draws up to 10 funny moments using the given RNG.
///
/// Shuffle-then-truncate: a uniform random subset, not weighted. Output
/// order is the shuffle order and carries no meaning.
///
/// # Example
///
/// ```
/// use chatstats::{TranscriptParser, sample_moments_with};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str(
///     "01/01/2024 10:00 - Alice: kkkkkk não acredito que isso aconteceu de verdade",
/// );
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let moments = sample_moments_with(&messages, &mut rng);
/// assert_eq!(moments.len(), 1);
/// ```
pub fn sample_moments_with<R: Rng + ?Sized>(messages: &[Message], rng: &mut R) -> Vec<Message> {
    let mut funny: Vec<Message> = messages.iter().filter(|m| is_funny(m)).cloned().collect();
    funny.shuffle(rng);
    funny.truncate(MAX_MOMENTS);
    funny
}

/// Draws up to 10 funny moments with the thread-local RNG.
pub fn sample_moments(messages: &[Message]) -> Vec<Message> {
    sample_moments_with(messages, &mut rand::thread_rng())
}
