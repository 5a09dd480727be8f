//! Candidate game catalog
//!
//! This module provides the storage seam the featured endpoint loads
//! candidates from, plus seed file loading.

pub mod loader;
pub mod storage;

// Re-export commonly used types
pub use loader::{load_games_file, parse_games};
pub use storage::{validate_game, CatalogStorage, InMemoryCatalogStorage};
