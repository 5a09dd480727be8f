//! Rank File CLI Tool
//!
//! Ranks a JSON catalog export offline with the same featured ranker the
//! service uses.
//!
//! Usage:
//!   cargo run --bin rank-file -- games.json --limit 5
//!   cargo run --bin rank-file -- games.json --now 2025-06-01T00:00:00Z --pretty
//!   cat games.json | cargo run --bin rank-file -- - --config game-hunt.toml

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use game_hunt::catalog::parse_games;
use game_hunt::config::AppConfig;
use game_hunt::ranking::{FeaturedRanker, RankingWeights};
use game_hunt::types::ScoredGame;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rank-file")]
#[command(about = "Rank a JSON array of candidate games for featured placement")]
struct Cli {
    /// Input file with a JSON array of games, or "-" for stdin
    input: PathBuf,

    /// Maximum number of games to output
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Instant to rank at (RFC 3339); defaults to the current time
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// TOML config file to take ranking weights from
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", raw, e))
}

/// Read the input file, or `stdin` when the path is "-"
fn read_input(input: &Path, mut stdin: impl Read) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut contents = String::new();
        stdin
            .read_to_string(&mut contents)
            .context("Failed to read games from stdin")?;
        return Ok(contents);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read games from {}", input.display()))
}

fn load_weights(config: Option<&Path>) -> Result<RankingWeights> {
    match config {
        Some(path) => Ok(AppConfig::from_file(path)?.ranking.weights),
        None => Ok(RankingWeights::default()),
    }
}

fn rank_json(
    raw: &str,
    weights: RankingWeights,
    limit: usize,
    now: Option<DateTime<Utc>>,
) -> Result<Vec<ScoredGame>> {
    weights.validate()?;
    let games = parse_games(raw)?;
    let ranker = FeaturedRanker::new(weights);

    Ok(match now {
        Some(now) => ranker.rank_at(&games, limit, now),
        None => ranker.rank(&games, limit),
    })
}

fn render(ranked: &[ScoredGame], pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(ranked)?
    } else {
        serde_json::to_string(ranked)?
    };
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let raw = read_input(&cli.input, std::io::stdin().lock())?;
    let weights = load_weights(cli.config.as_deref())?;
    let ranked = rank_json(&raw, weights, cli.limit, cli.now)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render(&ranked, cli.pretty)?)?;
    Ok(())
}
