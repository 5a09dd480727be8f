//! Featured ranking configuration

use crate::ranking::RankingWeights;
use serde::{Deserialize, Serialize};

/// Featured ranking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Number of featured games returned when the caller gives no limit
    pub default_limit: usize,
    /// Hard cap on the number of featured games per request
    pub max_limit: usize,
    /// Factor weights of the featured score
    pub weights: RankingWeights,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            weights: RankingWeights::default(),
        }
    }
}

impl RankingSettings {
    /// Resolve a caller-supplied limit. Absent uses the default, non-positive
    /// yields 0, and anything above the cap is clamped to it.
    pub fn resolve_limit(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_limit.min(self.max_limit),
            Some(n) if n <= 0 => 0,
            Some(n) => usize::try_from(n).map_or(self.max_limit, |n| n.min(self.max_limit)),
        }
    }
}
