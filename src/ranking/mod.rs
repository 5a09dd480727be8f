//! Featured games ranking
//!
//! This module provides the weighted featured score, its normalization
//! helpers, and an injectable clock for the recency factor.

pub mod clock;
pub mod featured;
pub mod normalize;
pub mod weights;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use featured::FeaturedRanker;
pub use normalize::{MinMax, RecencyWindow};
pub use weights::RankingWeights;
