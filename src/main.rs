use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rapport::{
    build_timeline, read_transcript, score_all, JsonReport, ScoreTable, ScoringConfig, Timeline,
    TimelineConfig, TimelineText,
};

#[derive(Parser)]
#[command(name = "rapport")]
#[command(author, version, about = "Chat transcript compatibility scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct conversations and score compatibility with the other party
    Score {
        /// Input transcript file (line-oriented chat export)
        #[arg(short, long)]
        input: PathBuf,

        /// Sender name of the designated user
        #[arg(short, long)]
        user: String,

        /// Ceiling for the conversation persistence score
        #[arg(long, default_value = "25")]
        persistence_max: f64,

        /// Ceiling for the reply interval score
        #[arg(long, default_value = "25")]
        interval_max: f64,

        /// Ceiling for the content quality score
        #[arg(long, default_value = "25")]
        content_max: f64,

        /// Ceiling for the call duration score
        #[arg(long, default_value = "25")]
        call_max: f64,

        /// Number of header lines to skip
        #[arg(long, default_value = "3")]
        header_lines: usize,

        /// Output file for the machine-readable report (JSON)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Output file for the reconstructed conversations (text)
        #[arg(long)]
        timeline: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Reconstruct conversations and print statistics without scoring
    Analyze {
        /// Input transcript file (line-oriented chat export)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of header lines to skip
        #[arg(long, default_value = "3")]
        header_lines: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            user,
            persistence_max,
            interval_max,
            content_max,
            call_max,
            header_lines,
            json,
            timeline,
            verbose,
        } => {
            setup_logging(verbose);
            let scoring_config = ScoringConfig {
                persistence_max_score: persistence_max,
                interval_max_score: interval_max,
                content_max_score: content_max,
                call_max_score: call_max,
                ..Default::default()
            };
            score_transcript(input, &user, header_lines, &scoring_config, json, timeline)
        }
        Commands::Analyze {
            input,
            header_lines,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(input, header_lines)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_timeline(input: &Path, header_lines: usize) -> Result<Timeline> {
    let config = TimelineConfig {
        header_lines,
        ..Default::default()
    };

    info!("Loading transcript from {:?}", input);
    let lines =
        read_transcript(input, config.header_lines).context("Failed to read input transcript")?;
    let timeline = build_timeline(&lines, &config).context("Failed to reconstruct conversations")?;

    if timeline.orphaned_continuations > 0 {
        warn!(
            "{} continuation lines appeared before the first message and were ignored",
            timeline.orphaned_continuations
        );
    }

    Ok(timeline)
}

fn score_transcript(
    input: PathBuf,
    user: &str,
    header_lines: usize,
    scoring_config: &ScoringConfig,
    json: Option<PathBuf>,
    timeline_output: Option<PathBuf>,
) -> Result<()> {
    let timeline = load_timeline(&input, header_lines)?;

    let senders = timeline.turns_by_sender();
    if !senders.contains_key(user) {
        warn!("Designated user {:?} never speaks in this transcript", user);
    }
    if senders.len() > 2 {
        warn!("Transcript has {} senders; scores assume two participants", senders.len());
    }

    info!("Scoring against designated user {:?}", user);
    let report = score_all(&timeline.conversations, user, scoring_config);

    print!("{}", ScoreTable::new(&report).format());

    if let Some(path) = json {
        info!("Writing JSON report to {:?}", path);
        JsonReport::new(user, report.clone(), &timeline).write_json(&path)?;
    }

    if let Some(path) = timeline_output {
        info!("Writing conversation timeline to {:?}", path);
        TimelineText::new(&timeline).write_file(&path)?;
    }

    Ok(())
}

fn analyze_transcript(input: PathBuf, header_lines: usize) -> Result<()> {
    let timeline = load_timeline(&input, header_lines)?;
    let stats = &timeline.line_stats;

    println!("Transcript Analysis");
    println!("==================");
    println!("Date markers: {}", stats.date_markers);
    println!("Messages: {}", stats.messages);
    println!("Continuation lines: {}", stats.continuations);
    println!("Blank lines: {}", stats.blank);
    println!();

    println!("Timeline");
    println!("--------");
    println!("Total turns: {}", timeline.turn_count());
    println!("Conversations: {}", timeline.conversations.len());
    if let Some(span) = timeline.longest_span() {
        println!(
            "Longest conversation: {}h {:02}m",
            span.num_hours(),
            span.num_minutes() % 60
        );
    }
    println!();

    println!("Sender Statistics");
    println!("-----------------");
    for (sender, turns) in timeline.turns_by_sender() {
        let fragments: usize = timeline
            .turns()
            .filter(|t| t.sender == sender)
            .map(|t| t.fragment_count())
            .sum();
        println!("{}: {} turns, {} fragments", sender, turns, fragments);
    }

    Ok(())
}
