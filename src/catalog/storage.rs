//! Catalog storage interface and implementations
//!
//! The ranker never owns game records; it receives a fresh snapshot from a
//! `CatalogStorage` on every featured request. Listing order is the input
//! order the ranker uses to break score ties.

use crate::error::GameHuntError;
use crate::types::{CandidateGame, EditorialUpdate, MAX_RATING};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Trait for catalog storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Snapshot of all games in insertion order
    async fn list_games(&self) -> crate::error::Result<Vec<CandidateGame>>;

    /// Get a single game
    async fn get_game(&self, game_id: &str) -> crate::error::Result<Option<CandidateGame>>;

    /// Insert a game or replace the one with the same id in place.
    /// Returns true when the game was newly inserted.
    async fn upsert_game(&self, game: CandidateGame) -> crate::error::Result<bool>;

    /// Change editorial flags, returning the updated game
    async fn update_editorial(
        &self,
        game_id: &str,
        update: EditorialUpdate,
    ) -> crate::error::Result<CandidateGame>;

    /// Remove a game; false if it did not exist
    async fn remove_game(&self, game_id: &str) -> crate::error::Result<bool>;

    /// Number of games in the catalog
    async fn game_count(&self) -> crate::error::Result<usize>;
}

/// Reject records the ranker should never see from the catalog
pub fn validate_game(game: &CandidateGame) -> crate::error::Result<()> {
    if game.id.trim().is_empty() {
        return Err(GameHuntError::InvalidGame {
            reason: "game id cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(rating) = game.rating {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(GameHuntError::InvalidGame {
                reason: format!(
                    "rating for '{}' must be between 0 and {}, got {}",
                    game.id, MAX_RATING, rating
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// In-memory catalog storage implementation
#[derive(Debug)]
pub struct InMemoryCatalogStorage {
    games: RwLock<Vec<CandidateGame>>,
    max_games: usize,
}

impl InMemoryCatalogStorage {
    /// Create a new in-memory catalog
    pub fn new(max_games: usize) -> Self {
        Self {
            games: RwLock::new(Vec::new()),
            max_games,
        }
    }

    /// Create a catalog pre-populated with `games`
    pub async fn with_games(
        max_games: usize,
        games: Vec<CandidateGame>,
    ) -> crate::error::Result<Self> {
        let storage = Self::new(max_games);
        for game in games {
            storage.upsert_game(game).await?;
        }
        Ok(storage)
    }

    pub fn max_games(&self) -> usize {
        self.max_games
    }
}

impl Default for InMemoryCatalogStorage {
    fn default() -> Self {
        Self::new(10000) // Default to 10,000 max games
    }
}

#[async_trait]
impl CatalogStorage for InMemoryCatalogStorage {
    async fn list_games(&self) -> crate::error::Result<Vec<CandidateGame>> {
        Ok(self.games.read().await.clone())
    }

    async fn get_game(&self, game_id: &str) -> crate::error::Result<Option<CandidateGame>> {
        let games = self.games.read().await;
        Ok(games.iter().find(|g| g.id == game_id).cloned())
    }

    async fn upsert_game(&self, game: CandidateGame) -> crate::error::Result<bool> {
        validate_game(&game)?;

        let mut games = self.games.write().await;

        if let Some(existing) = games.iter_mut().find(|g| g.id == game.id) {
            debug!("Replacing game '{}' in catalog", game.id);
            *existing = game;
            return Ok(false);
        }

        if games.len() >= self.max_games {
            return Err(GameHuntError::CatalogFull {
                max_games: self.max_games,
            }
            .into());
        }

        debug!("Adding game '{}' to catalog", game.id);
        games.push(game);
        Ok(true)
    }

    async fn update_editorial(
        &self,
        game_id: &str,
        update: EditorialUpdate,
    ) -> crate::error::Result<CandidateGame> {
        let mut games = self.games.write().await;

        let game = games.iter_mut().find(|g| g.id == game_id).ok_or_else(|| {
            GameHuntError::GameNotFound {
                game_id: game_id.to_string(),
            }
        })?;

        update.apply(game);
        Ok(game.clone())
    }

    async fn remove_game(&self, game_id: &str) -> crate::error::Result<bool> {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|g| g.id != game_id);
        Ok(games.len() < before)
    }

    async fn game_count(&self) -> crate::error::Result<usize> {
        Ok(self.games.read().await.len())
    }
}
