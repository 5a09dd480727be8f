//! Featured games ranker
//!
//! Blends five batch-normalized factors (upvotes, comments, rating, recency,
//! editorial boost) into a score in [0, 1]. Games flagged with an editorial
//! override are pinned ahead of all scored games in their input order; the
//! rest follow by descending score, ties keeping input order.

use crate::ranking::clock::{Clock, SystemClock};
use crate::ranking::normalize::{normalize_in, MinMax, RecencyWindow};
use crate::ranking::weights::RankingWeights;
use crate::types::{CandidateGame, ScoreComponents, ScoredGame};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Featured games ranker
#[derive(Clone)]
pub struct FeaturedRanker {
    weights: RankingWeights,
    clock: Arc<dyn Clock>,
}

impl FeaturedRanker {
    /// Create a ranker that reads wall-clock time
    pub fn new(weights: RankingWeights) -> Self {
        Self::with_clock(weights, Arc::new(SystemClock))
    }

    /// Create a ranker with an explicit time source
    pub fn with_clock(weights: RankingWeights, clock: Arc<dyn Clock>) -> Self {
        Self { weights, clock }
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Rank `games` at the clock's current instant and keep at most `limit`
    pub fn rank(&self, games: &[CandidateGame], limit: usize) -> Vec<ScoredGame> {
        self.rank_at(games, limit, self.clock.now())
    }

    /// Rank `games` as of `now` and keep at most `limit`
    pub fn rank_at(
        &self,
        games: &[CandidateGame],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<ScoredGame> {
        if limit == 0 || games.is_empty() {
            return Vec::new();
        }

        let (pinned, mut others): (Vec<ScoredGame>, Vec<ScoredGame>) = self
            .score_all_at(games, now)
            .into_iter()
            .partition(|scored| scored.game.editorial_override);

        // sort_by is stable, so equal scores keep input order
        others.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            "Ranked {} candidates ({} pinned), returning up to {}",
            games.len(),
            pinned.len(),
            limit
        );

        pinned.into_iter().chain(others).take(limit).collect()
    }

    /// Score every game as of `now`, preserving input order
    pub fn score_all_at(&self, games: &[CandidateGame], now: DateTime<Utc>) -> Vec<ScoredGame> {
        let upvotes = MinMax::from_values(games.iter().map(|g| g.upvote_count as f64));
        let comments = MinMax::from_values(games.iter().map(|g| g.comment_count as f64));
        let ratings = MinMax::from_values(games.iter().filter_map(CandidateGame::usable_rating));
        let recency =
            RecencyWindow::from_releases(now, games.iter().filter_map(|g| g.release_timestamp));

        games
            .iter()
            .map(|game| {
                let components = ScoreComponents {
                    upvotes: normalize_in(upvotes, game.upvote_count as f64),
                    comments: normalize_in(comments, game.comment_count as f64),
                    rating: game
                        .usable_rating()
                        .map_or(0.0, |rating| normalize_in(ratings, rating)),
                    recency: recency.contribution(game.release_timestamp),
                    editorial_boost: if game.editorial_boost { 1.0 } else { 0.0 },
                };

                ScoredGame {
                    game: game.clone(),
                    score: self.weights.combine(&components),
                    components,
                }
            })
            .collect()
    }
}

impl Default for FeaturedRanker {
    fn default() -> Self {
        Self::new(RankingWeights::default())
    }
}

impl std::fmt::Debug for FeaturedRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeaturedRanker")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}
