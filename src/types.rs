//! Common types used throughout the featured ranking service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier for games
pub type GameId = String;

/// Upper bound of the rating scale
pub const MAX_RATING: f64 = 5.0;

/// A game considered for featured placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateGame {
    #[serde(default)]
    pub id: GameId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub upvote_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    /// Average user rating on a 0-5 scale, if any
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub release_timestamp: Option<DateTime<Utc>>,
    /// Manual flag that adds a fixed contribution to the score
    #[serde(default)]
    pub editorial_boost: bool,
    /// Manual flag that pins the game ahead of all scored games
    #[serde(default)]
    pub editorial_override: bool,
}

impl CandidateGame {
    /// Create a game with no engagement, rating, release date or editorial flags
    pub fn new(id: impl Into<GameId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            upvote_count: 0,
            comment_count: 0,
            rating: None,
            release_timestamp: None,
            editorial_boost: false,
            editorial_override: false,
        }
    }

    /// Rating usable for scoring. Non-finite values count as unrated.
    pub fn usable_rating(&self) -> Option<f64> {
        self.rating.filter(|r| r.is_finite())
    }
}

/// Normalized per-factor contributions, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub upvotes: f64,
    pub comments: f64,
    pub rating: f64,
    pub recency: f64,
    pub editorial_boost: f64,
}

/// A candidate with its blended score attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredGame {
    #[serde(flatten)]
    pub game: CandidateGame,
    pub score: f64,
    pub components: ScoreComponents,
}

/// Partial update of a game's editorial flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorialUpdate {
    #[serde(default)]
    pub editorial_boost: Option<bool>,
    #[serde(default)]
    pub editorial_override: Option<bool>,
}

impl EditorialUpdate {
    /// Apply the present fields to a game
    pub fn apply(&self, game: &mut CandidateGame) {
        if let Some(boost) = self.editorial_boost {
            game.editorial_boost = boost;
        }
        if let Some(pinned) = self.editorial_override {
            game.editorial_override = pinned;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.editorial_boost.is_none() && self.editorial_override.is_none()
    }
}
