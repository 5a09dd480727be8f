//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the game-hunt featured
//! ranking service using Prometheus metrics.

use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the ranking service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// Featured ranking metrics
    ranking_metrics: RankingMetrics,

    /// Catalog metrics
    catalog_metrics: CatalogMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,

    /// HTTP requests by route and status code
    pub http_requests_total: IntCounterVec,
}

/// Featured ranking metrics
#[derive(Clone)]
pub struct RankingMetrics {
    /// Featured ranking requests by outcome
    pub requests_total: IntCounterVec,

    /// Time spent ranking a batch
    pub ranking_duration: Histogram,

    /// Candidates considered per request
    pub candidates_per_request: Histogram,

    /// Games returned per request
    pub returned_per_request: Histogram,

    /// Games placed by editorial override
    pub pinned_total: IntCounter,
}

/// Catalog metrics
#[derive(Clone)]
pub struct CatalogMetrics {
    /// Games currently in the catalog
    pub games: IntGauge,

    /// Catalog mutations by operation
    pub mutations_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let ranking_metrics = RankingMetrics::new(&registry)?;
        let catalog_metrics = CatalogMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            ranking_metrics,
            catalog_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get service metrics
    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    /// Get ranking metrics
    pub fn ranking(&self) -> &RankingMetrics {
        &self.ranking_metrics
    }

    /// Get catalog metrics
    pub fn catalog(&self) -> &CatalogMetrics {
        &self.catalog_metrics
    }

    /// Record a completed featured ranking
    pub fn record_ranking(
        &self,
        candidates: usize,
        returned: usize,
        pinned: usize,
        duration: Duration,
    ) {
        self.ranking_metrics
            .requests_total
            .with_label_values(&["success"])
            .inc();
        self.ranking_metrics
            .ranking_duration
            .observe(duration.as_secs_f64());
        self.ranking_metrics
            .candidates_per_request
            .observe(candidates as f64);
        self.ranking_metrics
            .returned_per_request
            .observe(returned as f64);
        self.ranking_metrics.pinned_total.inc_by(pinned as u64);
    }

    /// Record a featured request that failed before ranking
    pub fn record_ranking_failure(&self) {
        self.ranking_metrics
            .requests_total
            .with_label_values(&["error"])
            .inc();
    }

    /// Record a catalog mutation and the resulting catalog size
    pub fn record_catalog_mutation(&self, operation: &str, game_count: usize) {
        self.catalog_metrics
            .mutations_total
            .with_label_values(&[operation])
            .inc();
        self.catalog_metrics.games.set(game_count as i64);
    }

    /// Set the catalog size gauge
    pub fn set_catalog_size(&self, game_count: usize) {
        self.catalog_metrics.games.set(game_count as i64);
    }

    /// Record an HTTP request
    pub fn record_http_request(&self, route: &str, status: u16) {
        self.service_metrics
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.service_metrics.health_status.set(status as i64);
    }

    /// Update uptime
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds =
            IntGauge::new("game_hunt_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let health_status = IntGauge::new(
            "game_hunt_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("game_hunt_http_requests_total", "Total HTTP requests"),
            &["route", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            uptime_seconds,
            health_status,
            http_requests_total,
        })
    }
}

impl RankingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new(
                "game_hunt_featured_requests_total",
                "Total featured ranking requests",
            ),
            &["status"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let ranking_duration = Histogram::with_opts(
            HistogramOpts::new(
                "game_hunt_ranking_duration_seconds",
                "Featured ranking time",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1]),
        )?;
        registry.register(Box::new(ranking_duration.clone()))?;

        let candidates_per_request = Histogram::with_opts(
            HistogramOpts::new(
                "game_hunt_ranking_candidates",
                "Candidates considered per featured request",
            )
            .buckets(vec![0.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]),
        )?;
        registry.register(Box::new(candidates_per_request.clone()))?;

        let returned_per_request = Histogram::with_opts(
            HistogramOpts::new(
                "game_hunt_ranking_returned",
                "Games returned per featured request",
            )
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        )?;
        registry.register(Box::new(returned_per_request.clone()))?;

        let pinned_total = IntCounter::new(
            "game_hunt_ranking_pinned_total",
            "Games placed by editorial override",
        )?;
        registry.register(Box::new(pinned_total.clone()))?;

        Ok(Self {
            requests_total,
            ranking_duration,
            candidates_per_request,
            returned_per_request,
            pinned_total,
        })
    }
}

impl CatalogMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let games = IntGauge::new("game_hunt_catalog_games", "Games in the catalog")?;
        registry.register(Box::new(games.clone()))?;

        let mutations_total = IntCounterVec::new(
            Opts::new(
                "game_hunt_catalog_mutations_total",
                "Catalog mutations by operation",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(mutations_total.clone()))?;

        Ok(Self {
            games,
            mutations_total,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
