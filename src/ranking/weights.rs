//! Factor weights for the featured score

use crate::error::GameHuntError;
use crate::types::ScoreComponents;
use crate::utils::approx_eq;
use serde::{Deserialize, Serialize};

/// Allowed drift of the weight sum from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight of each normalized factor in the blended score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub upvotes: f64,
    pub comments: f64,
    pub rating: f64,
    pub recency: f64,
    pub editorial_boost: f64,
}

impl RankingWeights {
    pub const DEFAULT: RankingWeights = RankingWeights {
        upvotes: 0.30,
        comments: 0.20,
        rating: 0.25,
        recency: 0.15,
        editorial_boost: 0.10,
    };

    pub fn sum(&self) -> f64 {
        self.upvotes + self.comments + self.rating + self.recency + self.editorial_boost
    }

    /// Check that every weight is finite and non-negative and that they sum to 1
    pub fn validate(&self) -> crate::error::Result<()> {
        let named = [
            ("upvotes", self.upvotes),
            ("comments", self.comments),
            ("rating", self.rating),
            ("recency", self.recency),
            ("editorial_boost", self.editorial_boost),
        ];

        for (name, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GameHuntError::InvalidWeights {
                    reason: format!("{} weight must be a non-negative number, got {}", name, weight),
                }
                .into());
            }
        }

        let sum = self.sum();
        if !approx_eq(sum, 1.0, WEIGHT_SUM_TOLERANCE) {
            return Err(GameHuntError::InvalidWeights {
                reason: format!("weights must sum to 1.0, got {:.6}", sum),
            }
            .into());
        }

        Ok(())
    }

    /// Blend normalized components into a single score
    pub fn combine(&self, components: &ScoreComponents) -> f64 {
        self.upvotes * components.upvotes
            + self.comments * components.comments
            + self.rating * components.rating
            + self.recency * components.recency
            + self.editorial_boost * components.editorial_boost
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
