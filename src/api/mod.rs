//! HTTP API for the game-hunt service
//!
//! This module exposes the featured ranking, catalog management, health
//! probes and Prometheus metrics over Axum.

pub mod error;
pub mod extract;
pub mod games;
pub mod health;
pub mod server;

pub use error::ApiError;
pub use extract::{ApiJson, ApiQuery};
pub use server::{create_router, HttpServer, HttpServerConfig};
