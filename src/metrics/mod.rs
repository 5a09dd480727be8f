//! Metrics and monitoring for the game-hunt ranking service
//!
//! This module provides Prometheus metrics collection for featured ranking,
//! catalog changes and HTTP traffic.

pub mod collector;

pub use collector::{CatalogMetrics, MetricsCollector, MetricsTimer, RankingMetrics, ServiceMetrics};
