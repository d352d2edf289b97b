use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use study_scheduler::{
    Config, LearningSession, Quality, Scheduler,
    export::{export_json_to_path, import_json},
    recommend_difficulty,
    stats::DeckSummary,
};

/// Plan flashcard reviews for a deck file using SM-2 scheduling.
#[derive(Parser)]
#[command(name = "study-planner", version)]
struct Args {
    /// Deck file (JSON)
    #[arg(long)]
    deck: PathBuf,

    /// Scheduler configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 timestamp instead of the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List due cards in study order
    Due,
    /// Grade one card and save the deck
    Review { card_id: String, quality: Quality },
    /// Print a summary of the deck
    Stats,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = format!("study_scheduler={0},study_planner={0}", args.log_level);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    let scheduler = Scheduler::new(config.scheduler.clone());
    let now = args.now.unwrap_or_else(Utc::now);

    let mut deck = import_json(&args.deck)
        .with_context(|| format!("loading deck from {}", args.deck.display()))?;

    match args.command {
        Command::Due => {
            let session = LearningSession::from_due_cards(
                deck.name.clone(),
                &deck.flashcards,
                now,
                scheduler,
                config.study.review_limit,
            );

            println!("{}: {}", session.deck_name, session.phase_message());
            for card in &session.all_cards {
                let review = &card.flashcard.review;
                let difficulty = review
                    .accuracy_percent
                    .map(|accuracy| recommend_difficulty(accuracy).to_string())
                    .unwrap_or_else(|| "new".to_string());
                println!("  [{}] {} ({})", card.flashcard.id, card.flashcard.question, difficulty);
            }
        }
        Command::Review { card_id, quality } => {
            let card = deck
                .find_card_mut(&card_id)
                .with_context(|| format!("no card with id '{card_id}' in deck"))?;

            let outcome = scheduler.compute_next_review(&card.review, quality.value(), now)?;
            card.review = outcome.state;

            export_json_to_path(&deck, &args.deck)
                .with_context(|| format!("saving deck to {}", args.deck.display()))?;

            info!(card = %card_id, quality = %quality, "review recorded");
            println!(
                "Next review of '{}' in {} day(s), at {}",
                card_id,
                outcome.interval_days,
                outcome.next_review_at.format("%Y-%m-%d %H:%M")
            );
        }
        Command::Stats => {
            let summary = DeckSummary::from_cards(&deck.flashcards, now);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
