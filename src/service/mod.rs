//! Service layer for the game-hunt ranking service
//!
//! This module contains the main application state and health reporting
//! for the production service.

pub mod app;
pub mod health;

pub use app::{AppState, ServiceError};
pub use health::{HealthCheck, HealthStatus};
