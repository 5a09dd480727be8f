//! Configuration management for the game-hunt service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the ranking service.

pub mod app;
pub mod catalog;
pub mod ranking;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use catalog::CatalogSettings;
pub use ranking::RankingSettings;
