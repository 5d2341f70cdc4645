//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatstats::cli::{Args, ReportFormat};
use chatstats::{
    ChatstatsError, FilterConfig, IdentityMap, Report, ReportOptions, TranscriptParser,
    WordFrequencyConfig, apply_filters, build_report, person_ranking, write_csv, write_json,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Print header
    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    if let Some(ref output) = args.output {
        println!("💾 Output:  {}", output);
        println!("📄 Format:  {}", args.format);
    }

    // Load contact names for sender resolution
    let parser = if let Some(ref contacts) = args.contacts {
        let identities = IdentityMap::from_json_file(Path::new(contacts))?;
        println!("👥 Contacts: {} entries", identities.len());
        TranscriptParser::with_identities(identities)
    } else {
        TranscriptParser::new()
    };

    // Build filter configuration
    let mut filter_config = FilterConfig::new();

    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }

    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }

    if let Some(ref from) = args.from {
        filter_config = filter_config.with_sender(from.clone());
        println!("👤 From:    {}", from);
    }

    println!();

    // Step 1: Parse
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let messages = parser.parse(Path::new(&args.input))?;
    let original_count = messages.len();
    println!(
        "   Found {} messages ({:.2}s)",
        original_count,
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Filter (BEFORE analysis)
    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filter_start = Instant::now();
        let filtered = apply_filters(messages, &filter_config);
        println!(
            "   {} messages after filtering ({:.2}s)",
            filtered.len(),
            filter_start.elapsed().as_secs_f64()
        );
        filtered
    } else {
        messages
    };

    // Step 3: Analyze
    println!("🧮 Analyzing...");
    let analyze_start = Instant::now();

    let mut words_config = WordFrequencyConfig::new()
        .with_granularity(args.words_by.into())
        .with_density(args.density.into())
        .with_strip_verb_forms(!args.keep_verbs);
    if let Some(index) = args.words_day {
        words_config = words_config.with_day_index(index);
    }

    let mut options = ReportOptions::new().with_words(words_config);
    if let Some(seed) = args.seed {
        options = options.with_seed(seed);
    }

    let report = build_report(&messages, &options);
    println!("   Done ({:.2}s)", analyze_start.elapsed().as_secs_f64());

    print_summary(&report);

    // Step 4: Write report in selected format
    if let Some(ref output) = args.output {
        println!();
        println!("💾 Writing {}...", args.format);
        let write_start = Instant::now();
        match args.format {
            ReportFormat::Json => write_json(&report, output)?,
            ReportFormat::Csv => write_csv(&report, output)?,
        }
        println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());
        println!();
        println!("✅ Done! Report saved to {}", output);
    }

    let total_time = total_start.elapsed();

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = original_count as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

/// Prints the headline numbers, rankings, and samples to the console.
fn print_summary(report: &Report) {
    println!();
    println!("📊 Summary:");
    println!("   Messages:     {}", report.summary.total_messages);
    println!("   Participants: {}", report.summary.participants);
    println!("   Active days:  {}", report.summary.active_days);
    println!("   Avg per day:  {}", report.summary.average_per_day);

    let ranking = person_ranking(&report.stats);
    if !ranking.is_empty() {
        println!();
        println!("🏆 Top senders:");
        for (rank, (sender, count)) in ranking.iter().take(10).enumerate() {
            println!("   {:>2}. {} ({} messages)", rank + 1, sender, count);
        }
    }

    let busiest = &report.stats.busiest_day;
    if !busiest.date.is_empty() {
        println!();
        println!(
            "🔥 Busiest day: {} ({} messages)",
            busiest.date, busiest.count
        );
        for topic in &busiest.topics {
            println!("   • {}", topic);
        }
    }

    if !report.funny_moments.is_empty() {
        println!();
        println!("😂 Funny moments:");
        for moment in &report.funny_moments {
            println!("   {}: {}", moment.sender, moment.content);
        }
    }

    if !report.words.words.is_empty() {
        println!();
        println!("💬 Top words ({}):", report.words.label);
        for entry in report.words.words.iter().take(15) {
            println!("   {:<20} {}", entry.word, entry.count);
        }
    }
}
