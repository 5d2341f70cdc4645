//! Integration tests: full pipeline over realistic transcript fixtures.

use std::fs;
use std::path::Path;
use std::sync::Once;

use chatstats::prelude::*;

static INIT: Once = Once::new();

fn fixtures_dir() -> &'static str {
    "tests/fixtures"
}

fn ensure_fixtures() {
    INIT.call_once(|| {
        let dir = fixtures_dir();
        if !Path::new(dir).exists() {
            fs::create_dir_all(dir).unwrap();
        }

        // Android-style export: dash separator, day-first dates, encryption
        // boilerplate, placeholders, and one folded multiline message.
        let conversa = "\
12/03/2024 09:00 - As mensagens e ligações são protegidas com a criptografia de ponta a ponta
12/03/2024 09:15 - Ana: Bom dia grupo! Alguém vai no treino hoje?
12/03/2024 09:16 - Bruno: Vou sim, chego às sete
12/03/2024 09:16 - Ana: Fechado, te espero na portaria
então a gente aproveita e marca o churrasco
12/03/2024 10:40 - Carla: <Mídia oculta>
12/03/2024 21:03 - Bruno: kkkkkk o goleiro tomou frango de novo, não acredito nisso
13/03/2024 08:30 - Ana: Essa mensagem foi apagada
13/03/2024 19:45 - Carla: Gente, o síndico foi hilário na reunião de ontem, quase chorei de rir
13/03/2024 19:47 - Bruno: rsrs nem me fala, o síndico ficou vermelho
14/03/2024 07:55 - Ana: Lembrete: consulta marcada pra sexta às 14h
14/03/2024 07:58 - Bruno: 😂🤣 vocês viram o vídeo que mandei? melhor coisa da semana
14/03/2024 08:02 - Carla: Combinado então, levo o bolo no sábado
";
        fs::write(format!("{dir}/conversa.txt"), conversa).unwrap();

        // iOS-style export: bracketed headers with seconds and 2-digit years.
        let conversa_ios = "\
[12/03/24, 09:15:30] Ana: Bom dia grupo
[12/03/24, 09:16:02] Bruno: Opa, bom dia
[12/03/24, 09:17:45] Ana: Treino confirmado pra hoje
";
        fs::write(format!("{dir}/conversa_ios.txt"), conversa_ios).unwrap();

        // Contact table for sender resolution.
        let contatos = r#"{
  "+55 11 91234-5678": "Ana",
  "+55 11 98765-4321": "Bruno"
}"#;
        fs::write(format!("{dir}/contatos.json"), contatos).unwrap();

        // Export where senders are phone numbers.
        let conversa_fones = "\
12/03/2024 09:15 - +55 11 91234-5678: Bom dia grupo
12/03/2024 09:16 - +55 11 98765-4321: Opa, bom dia
12/03/2024 09:17 - +55 11 90000-0000: Quem fala?
";
        fs::write(format!("{dir}/conversa_fones.txt"), conversa_fones).unwrap();
    });
}

fn parse_fixture(name: &str) -> Vec<Message> {
    ensure_fixtures();
    let path = format!("{}/{}", fixtures_dir(), name);
    TranscriptParser::new().parse(Path::new(&path)).unwrap()
}

// ============================================================================
// Parsing
// ============================================================================

mod parsing_tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_android_fixture() {
        let messages = parse_fixture("conversa.txt");

        assert_eq!(messages.len(), 11);
        assert_eq!(messages[0].sender, "Ana");
        assert_eq!(messages[0].content, "Bom dia grupo! Alguém vai no treino hoje?");
        // The encryption notice has no sender colon and precedes any header.
        assert!(messages.iter().all(|m| !m.content.contains("criptografia")));
    }

    #[test]
    fn test_multiline_folding() {
        let messages = parse_fixture("conversa.txt");

        assert_eq!(
            messages[2].content,
            "Fechado, te espero na portaria\nentão a gente aproveita e marca o churrasco"
        );
        assert_eq!(messages[2].sender, "Ana");
    }

    #[test]
    fn test_parse_ios_fixture() {
        let messages = parse_fixture("conversa_ios.txt");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, "Bruno");
        // 2-digit year and seconds both survive.
        assert_eq!(
            messages[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 12)
                .unwrap()
                .and_hms_opt(9, 15, 30)
                .unwrap()
        );
    }

    #[test]
    fn test_mixed_formats_in_one_transcript() {
        let parser = TranscriptParser::new();
        let messages = parser.parse_str(
            "12/03/2024 09:15 - Ana: Primeira\n[12/03/24, 09:16:00] Bruno: Segunda",
        );

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Ana");
        assert_eq!(messages[1].sender, "Bruno");
    }

    #[test]
    fn test_missing_file_errors() {
        ensure_fixtures();
        let parser = TranscriptParser::new();
        let result = parser.parse(Path::new("tests/fixtures/nao_existe.txt"));

        assert!(result.is_err());
        assert!(result.unwrap_err().is_io());
    }
}

// ============================================================================
// Identity resolution
// ============================================================================

mod identity_tests {
    use super::*;

    #[test]
    fn test_contacts_resolution() {
        ensure_fixtures();
        let contacts_path = format!("{}/contatos.json", fixtures_dir());
        let identities = IdentityMap::from_json_file(Path::new(&contacts_path)).unwrap();
        assert_eq!(identities.len(), 2);

        let parser = TranscriptParser::with_identities(identities);
        let path = format!("{}/conversa_fones.txt", fixtures_dir());
        let messages = parser.parse(Path::new(&path)).unwrap();

        let senders: Vec<&str> = messages.iter().map(|m| m.sender.as_str()).collect();
        // Known numbers become names; unknown numbers stay as-is.
        assert_eq!(senders, vec!["Ana", "Bruno", "+55 11 90000-0000"]);
    }
}

// ============================================================================
// Statistics
// ============================================================================

mod stats_tests {
    use super::*;

    #[test]
    fn test_totals() {
        let stats = aggregate(&parse_fixture("conversa.txt"));

        assert_eq!(stats.total_messages, 11);
        assert_eq!(stats.participants(), 3);
        assert_eq!(stats.messages_per_person["Ana"], 4);
        assert_eq!(stats.messages_per_person["Bruno"], 4);
        assert_eq!(stats.messages_per_person["Carla"], 3);
    }

    #[test]
    fn test_daily_counts() {
        let stats = aggregate(&parse_fixture("conversa.txt"));

        assert_eq!(stats.active_days(), 3);
        assert_eq!(stats.messages_per_day["2024-03-12"], 5);
        assert_eq!(stats.messages_per_day["2024-03-13"], 3);
        assert_eq!(stats.messages_per_day["2024-03-14"], 3);
    }

    #[test]
    fn test_hourly_buckets() {
        let stats = aggregate(&parse_fixture("conversa.txt"));

        assert_eq!(stats.messages_per_hour[9].len(), 3);
        assert_eq!(stats.messages_per_hour[7].len(), 2);
        assert_eq!(stats.messages_per_hour[19].len(), 2);

        let bucketed: usize = stats.messages_per_hour.iter().map(Vec::len).sum();
        assert_eq!(bucketed, stats.total_messages);
    }

    #[test]
    fn test_personal_records() {
        let stats = aggregate(&parse_fixture("conversa.txt"));

        let ana_daily = &stats.daily_record_per_person["Ana"];
        assert_eq!(ana_daily.date, "2024-03-12");
        assert_eq!(ana_daily.count, 2);

        // Carla sent one message per day; the earliest day wins the tie.
        let carla_daily = &stats.daily_record_per_person["Carla"];
        assert_eq!(carla_daily.date, "2024-03-12");
        assert_eq!(carla_daily.count, 1);

        let ana_hourly = &stats.hourly_record_per_person["Ana"];
        assert_eq!(ana_hourly.date, "2024-03-12");
        assert_eq!(ana_hourly.hour, 9);
        assert_eq!(ana_hourly.count, 2);
    }

    #[test]
    fn test_busiest_day_and_topics() {
        let stats = aggregate(&parse_fixture("conversa.txt"));

        assert_eq!(stats.busiest_day.date, "2024-03-12");
        assert_eq!(stats.busiest_day.count, 5);

        // Four of the five messages that day fit the topic length window;
        // the media placeholder is too short.
        assert_eq!(stats.busiest_day.topics.len(), 4);
        assert_eq!(
            stats.busiest_day.topics[0],
            "Bom dia grupo! Alguém vai no treino hoje?"
        );
        assert!(
            stats
                .busiest_day
                .topics
                .iter()
                .all(|t| t != "<Mídia oculta>")
        );
    }

    #[test]
    fn test_funny_candidates() {
        use chatstats::is_funny;

        let messages = parse_fixture("conversa.txt");
        let candidates: Vec<&Message> = messages.iter().filter(|m| is_funny(m)).collect();

        assert_eq!(candidates.len(), 4);

        let moments = sample_moments(&messages);
        assert_eq!(moments.len(), 4);
        assert!(moments.iter().all(is_funny));
    }

    #[test]
    fn test_word_ranking() {
        let messages = parse_fixture("conversa.txt");
        let result = analyze(&messages, &WordFrequencyConfig::new());

        assert_eq!(result.label, "Março 2024");
        assert_eq!(result.days.len(), 3);

        let words: Vec<&str> = result.words.iter().map(|w| w.word.as_str()).collect();
        assert!(words.contains(&"churrasco"));
        assert!(words.contains(&"treino"));
        assert!(words.contains(&"goleiro"));

        // Boilerplate vocabulary and stop words never rank.
        for stopped in ["mídia", "oculta", "mensagem", "apagada", "grupo"] {
            assert!(!words.contains(&stopped), "ranked stop word: {stopped}");
        }
    }
}

// ============================================================================
// Reports and export
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_small_transcript_numbers() {
        let input = "01/01/2024 10:00 - Alice: Hello world\n\
                     01/01/2024 10:01 - Bob: Hi there\n\
                     01/02/2024 09:00 - Alice: Another day";
        let messages = TranscriptParser::new().parse_str(input);
        let stats = aggregate(&messages);

        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.messages_per_person["Alice"], 2);
        assert_eq!(stats.messages_per_person["Bob"], 1);
        assert_eq!(stats.messages_per_day["2024-01-01"], 2);
        // Dates are day-first: 01/02 is February 1st.
        assert_eq!(stats.messages_per_day["2024-02-01"], 1);
        assert_eq!(stats.busiest_day.date, "2024-01-01");
        assert_eq!(stats.busiest_day.count, 2);
    }

    #[test]
    fn test_full_pipeline() {
        let messages = parse_fixture("conversa.txt");
        let report = build_report(&messages, &ReportOptions::new().with_seed(42));

        assert_eq!(report.summary.total_messages, 11);
        assert_eq!(report.summary.participants, 3);
        assert_eq!(report.summary.active_days, 3);
        // 11 messages over 3 days rounds to 4.
        assert_eq!(report.summary.average_per_day, 4);

        assert_eq!(report.stats.busiest_day.date, "2024-03-12");
        assert_eq!(report.funny_moments.len(), 4);
        assert_eq!(report.words.label, "Março 2024");
    }

    #[test]
    fn test_filter_then_report() {
        let messages = parse_fixture("conversa.txt");
        let config = FilterConfig::new().with_sender("Ana");
        let filtered = apply_filters(messages, &config);

        let report = build_report(&filtered, &ReportOptions::new().with_seed(1));

        assert_eq!(report.summary.total_messages, 4);
        assert_eq!(report.summary.participants, 1);
        assert!(report.stats.messages_per_person.contains_key("Ana"));
    }

    #[test]
    fn test_json_export() {
        let messages = parse_fixture("conversa.txt");
        let report = build_report(&messages, &ReportOptions::new().with_seed(7));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relatorio.json");
        write_json(&report, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["summary"]["total_messages"], 11);
        assert_eq!(value["stats"]["busiest_day"]["date"], "2024-03-12");
        assert!(value["funny_moments"].is_array());
        assert!(value["words"]["words"].is_array());
    }

    #[test]
    fn test_csv_export() {
        let messages = parse_fixture("conversa.txt");
        let report = build_report(&messages, &ReportOptions::new().with_seed(7));

        let csv = to_csv(&report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Sender;Messages;Best day;Best day messages;Best hour;Best hour messages"
        );
        // Ana and Bruno tie at 4 messages; alphabetical order breaks the tie.
        assert_eq!(lines[1], "Ana;4;2024-03-12;2;09:00;2");
        assert_eq!(lines[2], "Bruno;4;2024-03-12;2;09:00;1");
        assert_eq!(lines[3], "Carla;3;2024-03-12;1;10:00;1");
    }

    #[test]
    fn test_seeded_pipeline_is_reproducible() {
        let messages = parse_fixture("conversa.txt");
        let options = ReportOptions::new().with_seed(99);

        let a = build_report(&messages, &options);
        let b = build_report(&messages, &options);

        assert_eq!(a.funny_moments, b.funny_moments);
        assert_eq!(to_json(&a).unwrap(), to_json(&b).unwrap());
    }
}
