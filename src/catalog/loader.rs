//! Seed file loading for the catalog

use crate::catalog::storage::validate_game;
use crate::types::CandidateGame;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Parse a JSON array of candidate games and validate every entry
pub fn parse_games(json: &str) -> Result<Vec<CandidateGame>> {
    let games: Vec<CandidateGame> =
        serde_json::from_str(json).context("Catalog JSON must be an array of games")?;

    for (index, game) in games.iter().enumerate() {
        validate_game(game).with_context(|| format!("Invalid game at index {}", index))?;
    }

    Ok(games)
}

/// Load and validate a catalog seed file
pub async fn load_games_file(path: impl AsRef<Path>) -> Result<Vec<CandidateGame>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;

    let games = parse_games(&contents)
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;

    info!("Loaded {} games from {}", games.len(), path.display());
    Ok(games)
}
