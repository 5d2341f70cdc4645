//! Property-based tests for chatstats.
//!
//! These tests generate random inputs to find edge cases.

use chrono::NaiveDate;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use chatstats::prelude::*;
use chatstats::{STOP_WORDS, is_funny};

/// Generate a random message with a timestamp inside 2024.
fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop::sample::select(vec!["Alice", "Bob", "Charlie", "Иван", "João 🎉"]),
        prop::sample::select(vec![
            "oi",
            "Bom dia grupo",
            "kkkkkk essa foi a melhor coisa que eu já vi na vida",
            "https://exemplo.com/link",
            "",
            "   ",
            "texto com \"aspas\" e ; ponto e vírgula",
            "🎉🔥💀 emoji",
        ]),
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
    )
        .prop_map(|(sender, content, month, day, hour, minute)| {
            let date = NaiveDate::from_ymd_opt(2024, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            Message::new(sender, content, date)
        })
}

/// Generate a vector of random messages
fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..max_len)
}

/// Generate transcript lines: valid headers in both grammars mixed with junk.
fn arb_transcript_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (
            1u32..=28,
            1u32..=12,
            0u32..24,
            0u32..60,
            prop::sample::select(vec!["Ana", "Bruno"]),
        )
            .prop_map(|(d, m, h, min, sender)| {
                format!("{d:02}/{m:02}/2024 {h:02}:{min:02} - {sender}: mensagem gerada")
            }),
        (1u32..=28, 1u32..=12, 0u32..24, 0u32..60).prop_map(|(d, m, h, min)| {
            format!("[{d:02}/{m:02}/24, {h:02}:{min:02}:00] Carla: outra mensagem")
        }),
        prop::sample::select(vec![
            "linha solta sem cabeçalho".to_string(),
            String::new(),
            "99/99/9999 99:99 - X: data impossível".to_string(),
            "   espaços   ".to_string(),
            "12/03/2024 - sem hora".to_string(),
        ]),
    ]
}

/// Generate a whole transcript
fn arb_transcript(max_lines: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_transcript_line(), 0..max_lines).prop_map(|lines| lines.join("\n"))
}

/// Generate single-line bodies that never look like header lines.
fn arb_bodies(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec("[a-zà-öø-ÿ]{1,8}", 1..5).prop_map(|words| words.join(" ")),
        1..max_len,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Parsing never panics, whatever the input looks like
    #[test]
    fn parse_never_panics(transcript in arb_transcript(40)) {
        let _ = TranscriptParser::new().parse_str(&transcript);
    }

    /// Every message needs a header line, so counts are bounded by lines
    #[test]
    fn parse_count_bounded_by_lines(transcript in arb_transcript(40)) {
        let messages = TranscriptParser::new().parse_str(&transcript);
        prop_assert!(messages.len() <= transcript.lines().count());
    }

    /// Single-line bodies survive the parse byte for byte, in input order
    #[test]
    fn parse_recovers_single_line_bodies(bodies in arb_bodies(20)) {
        let transcript = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| format!("{:02}/03/2024 10:{:02} - Ana: {body}", 1 + i % 28, i % 60))
            .collect::<Vec<_>>()
            .join("\n");
        let messages = TranscriptParser::new().parse_str(&transcript);
        prop_assert_eq!(messages.len(), bodies.len());
        for (message, body) in messages.iter().zip(&bodies) {
            prop_assert_eq!(&message.content, body);
        }
    }

    /// The full pipeline never panics on arbitrary transcripts
    #[test]
    fn pipeline_never_panics(transcript in arb_transcript(40)) {
        let messages = TranscriptParser::new().parse_str(&transcript);
        let _ = build_report(&messages, &ReportOptions::new().with_seed(0));
    }

    // ============================================
    // AGGREGATION PROPERTIES
    // ============================================

    /// Every count view sums back to the message total
    #[test]
    fn aggregate_counts_are_consistent(messages in arb_messages(30)) {
        let stats = aggregate(&messages);

        prop_assert_eq!(stats.total_messages, messages.len());

        let by_person: usize = stats.messages_per_person.values().sum();
        prop_assert_eq!(by_person, messages.len());

        let by_day: usize = stats.messages_per_day.values().sum();
        prop_assert_eq!(by_day, messages.len());

        let by_hour: usize = stats.messages_per_hour.iter().map(Vec::len).sum();
        prop_assert_eq!(by_hour, messages.len());
    }

    /// The busiest day carries the maximum daily count
    #[test]
    fn busiest_day_is_the_maximum(messages in arb_messages(30)) {
        let stats = aggregate(&messages);

        if messages.is_empty() {
            prop_assert!(stats.busiest_day.date.is_empty());
        } else {
            let max = stats.messages_per_day.values().copied().max().unwrap();
            prop_assert_eq!(stats.busiest_day.count, max);
            prop_assert_eq!(stats.messages_per_day[&stats.busiest_day.date], max);
        }
    }

    // ============================================
    // SAMPLER PROPERTIES
    // ============================================

    /// Samples are bounded, funny, and drawn from the input
    #[test]
    fn sampled_moments_are_valid(messages in arb_messages(30)) {
        let moments = sample_moments(&messages);

        prop_assert!(moments.len() <= 10);
        for moment in &moments {
            prop_assert!(is_funny(moment));
            prop_assert!(messages.contains(moment));
        }
    }

    /// The same seed always yields the same sample
    #[test]
    fn sampling_is_seed_deterministic(messages in arb_messages(30), seed in any::<u64>()) {
        let a = sample_moments_with(&messages, &mut StdRng::seed_from_u64(seed));
        let b = sample_moments_with(&messages, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }

    // ============================================
    // WORD-FREQUENCY PROPERTIES
    // ============================================

    /// Ranked words obey the token filters
    #[test]
    fn ranked_words_obey_filters(messages in arb_messages(30)) {
        let result = analyze(&messages, &WordFrequencyConfig::new());

        for entry in &result.words {
            prop_assert!(entry.count >= 1);
            prop_assert!(entry.word.chars().count() >= 4, "short token: {}", entry.word);
            prop_assert!(!STOP_WORDS.contains(&entry.word.as_str()), "stop word: {}", entry.word);
            prop_assert_eq!(&entry.word.to_lowercase(), &entry.word, "not lowercased: {}", entry.word);
        }
    }

    /// The ranking is sorted and truncated
    #[test]
    fn ranking_is_sorted_and_bounded(messages in arb_messages(30)) {
        let result = analyze(&messages, &WordFrequencyConfig::new());

        prop_assert!(result.words.len() <= 60);
        for pair in result.words.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// Sender filtering keeps only matching messages
    #[test]
    fn sender_filter_only_keeps_matching(messages in arb_messages(30)) {
        let config = FilterConfig::new().with_sender("Alice");
        let filtered = apply_filters(messages, &config);

        for msg in &filtered {
            prop_assert!(msg.sender.eq_ignore_ascii_case("Alice"));
        }
    }

    /// An inactive filter is a passthrough
    #[test]
    fn no_filter_is_passthrough(messages in arb_messages(30)) {
        let original = messages.clone();
        let filtered = apply_filters(messages, &FilterConfig::new());
        prop_assert_eq!(filtered, original);
    }
}

// ============================================
// NON-PROPTEST EDGE CASE TESTS
// ============================================

#[cfg(test)]
mod edge_cases {
    use super::*;

    #[test]
    fn junk_before_first_header_is_dropped() {
        let parser = TranscriptParser::new();
        let messages = parser.parse_str(
            "99/99/9999 99:99 - X: data impossível\n12/03/2024 09:15 - Ana: oi",
        );

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "oi");
    }

    #[test]
    fn fold_chain_accumulates_every_line() {
        let parser = TranscriptParser::new();
        let messages = parser.parse_str(
            "12/03/2024 09:15 - Ana: começo\nmeio\nfim",
        );

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "começo\nmeio\nfim");
    }

    #[test]
    fn sampler_is_empty_without_candidates() {
        let parser = TranscriptParser::new();
        let messages = parser.parse_str("12/03/2024 09:15 - Ana: mensagem séria");

        assert!(sample_moments(&messages).is_empty());
    }
}
