//! Error types for the featured ranking service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific catalog and ranking scenarios
#[derive(Debug, thiserror::Error)]
pub enum GameHuntError {
    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    #[error("Invalid game: {reason}")]
    InvalidGame { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Catalog is full: {max_games} games")]
    CatalogFull { max_games: usize },

    #[error("Invalid ranking weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}

impl GameHuntError {
    /// Short machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            GameHuntError::GameNotFound { .. } => "game_not_found",
            GameHuntError::InvalidGame { .. } => "invalid_game",
            GameHuntError::InvalidRequest { .. } => "invalid_request",
            GameHuntError::CatalogFull { .. } => "catalog_full",
            GameHuntError::InvalidWeights { .. } => "invalid_weights",
            GameHuntError::ConfigurationError { .. } => "configuration_error",
            GameHuntError::InternalError { .. } => "internal_error",
        }
    }
}
