//! Game Hunt - featured games ranking service
//!
//! This crate ranks mobile games for featured placement by blending
//! engagement, rating, recency and editorial signals, and serves the
//! ranked list over HTTP alongside an in-memory candidate catalog.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{GameHuntError, Result};
pub use types::*;

// Re-export key components
pub use catalog::{CatalogStorage, InMemoryCatalogStorage};
pub use ranking::{Clock, FeaturedRanker, FixedClock, RankingWeights, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
