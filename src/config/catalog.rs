//! Catalog configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON file of games loaded at startup
    pub seed_file: Option<PathBuf>,
    /// Maximum number of games held in memory
    pub max_games: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            seed_file: None,
            max_games: 10000,
        }
    }
}
