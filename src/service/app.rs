//! Main application state and service coordination
//!
//! This module contains the production AppState that wires the catalog,
//! the featured ranker and metrics together, and exposes the operations the
//! HTTP layer calls.

use crate::catalog::{load_games_file, CatalogStorage, InMemoryCatalogStorage};
use crate::config::AppConfig;
use crate::error::{GameHuntError, Result as GameHuntResult};
use crate::metrics::MetricsCollector;
use crate::ranking::FeaturedRanker;
use crate::types::{CandidateGame, EditorialUpdate, ScoredGame};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Catalog initialization error: {message}")]
    Catalog { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Source of candidate games
    catalog: Arc<dyn CatalogStorage>,

    /// Featured ranker
    ranker: FeaturedRanker,

    /// Prometheus metrics
    metrics: Arc<MetricsCollector>,

    /// Service start time
    started_at: Instant,

    /// Service status
    is_running: Arc<RwLock<bool>>,
}

impl AppState {
    /// Initialize the application with all dependencies
    pub async fn new(config: AppConfig) -> Result<Self, ServiceError> {
        info!("Initializing game-hunt featured ranking service");

        crate::config::validate_config(&config).map_err(|e| ServiceError::Configuration {
            message: format!("{:#}", e),
        })?;

        let catalog = Self::initialize_catalog(&config).await?;

        let metrics = MetricsCollector::new().map_err(|e| ServiceError::Initialization {
            message: format!("Failed to create metrics collector: {}", e),
        })?;

        let ranker = FeaturedRanker::new(config.ranking.weights);

        let state = Self::with_components(config, catalog, ranker, Arc::new(metrics));
        if let Ok(count) = state.catalog.game_count().await {
            state.metrics.set_catalog_size(count);
        }

        Ok(state)
    }

    /// Assemble state from already-built components
    pub fn with_components(
        config: AppConfig,
        catalog: Arc<dyn CatalogStorage>,
        ranker: FeaturedRanker,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            config,
            catalog,
            ranker,
            metrics,
            started_at: Instant::now(),
            is_running: Arc::new(RwLock::new(false)),
        }
    }

    async fn initialize_catalog(
        config: &AppConfig,
    ) -> Result<Arc<dyn CatalogStorage>, ServiceError> {
        let max_games = config.catalog.max_games;

        let Some(seed_file) = &config.catalog.seed_file else {
            info!("No catalog seed file configured, starting with an empty catalog");
            return Ok(Arc::new(InMemoryCatalogStorage::new(max_games)));
        };

        let games = load_games_file(seed_file)
            .await
            .map_err(|e| ServiceError::Catalog {
                message: format!("{:#}", e),
            })?;

        let storage = InMemoryCatalogStorage::with_games(max_games, games)
            .await
            .map_err(|e| ServiceError::Catalog {
                message: format!("{:#}", e),
            })?;

        Ok(Arc::new(storage))
    }

    /// Mark the service as running
    pub async fn start(&self) {
        let mut running = self.is_running.write().await;
        *running = true;
        info!("Service '{}' marked as running", self.config.service.name);
    }

    /// Mark the service as stopped
    pub async fn stop(&self) {
        let mut running = self.is_running.write().await;
        *running = false;
        info!("Service '{}' marked as stopped", self.config.service.name);
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> Arc<dyn CatalogStorage> {
        self.catalog.clone()
    }

    pub fn ranker(&self) -> &FeaturedRanker {
        &self.ranker
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Rank the current catalog for featured placement
    pub async fn featured(&self, requested_limit: Option<i64>) -> GameHuntResult<Vec<ScoredGame>> {
        let limit = self.config.ranking.resolve_limit(requested_limit);

        let games = match self.catalog.list_games().await {
            Ok(games) => games,
            Err(e) => {
                error!("Failed to load featured candidates: {}", e);
                self.metrics.record_ranking_failure();
                return Err(e);
            }
        };

        let timer = self.metrics.start_timer();
        let ranked = self.ranker.rank(&games, limit);
        let duration = timer.stop();

        let pinned = ranked
            .iter()
            .filter(|scored| scored.game.editorial_override)
            .count();
        self.metrics
            .record_ranking(games.len(), ranked.len(), pinned, duration);

        debug!(
            "Featured request - limit: {}, candidates: {}, returned: {}, time: {:.3}ms",
            limit,
            games.len(),
            ranked.len(),
            duration.as_secs_f64() * 1000.0
        );

        Ok(ranked)
    }

    /// List the catalog in insertion order
    pub async fn list_games(&self) -> GameHuntResult<Vec<CandidateGame>> {
        self.catalog.list_games().await
    }

    /// Fetch a single game
    pub async fn get_game(&self, game_id: &str) -> GameHuntResult<CandidateGame> {
        self.catalog
            .get_game(game_id)
            .await?
            .ok_or_else(|| not_found(game_id))
    }

    /// Insert or replace a game; true when newly inserted
    pub async fn upsert_game(&self, game: CandidateGame) -> GameHuntResult<bool> {
        let game_id = game.id.clone();
        let inserted = self.catalog.upsert_game(game).await?;
        self.record_mutation("upsert").await;

        info!(
            "Game '{}' {}",
            game_id,
            if inserted { "added" } else { "updated" }
        );
        Ok(inserted)
    }

    /// Change editorial flags of a game
    pub async fn update_editorial(
        &self,
        game_id: &str,
        update: EditorialUpdate,
    ) -> GameHuntResult<CandidateGame> {
        if update.is_empty() {
            warn!("Empty editorial update for game '{}'", game_id);
        }

        let game = self.catalog.update_editorial(game_id, update).await?;
        self.record_mutation("editorial").await;

        info!(
            "Editorial flags for '{}' - boost: {}, override: {}",
            game.id, game.editorial_boost, game.editorial_override
        );
        Ok(game)
    }

    /// Remove a game from the catalog
    pub async fn remove_game(&self, game_id: &str) -> GameHuntResult<()> {
        if !self.catalog.remove_game(game_id).await? {
            return Err(not_found(game_id));
        }
        self.record_mutation("remove").await;

        info!("Game '{}' removed", game_id);
        Ok(())
    }

    async fn record_mutation(&self, operation: &str) {
        match self.catalog.game_count().await {
            Ok(count) => self.metrics.record_catalog_mutation(operation, count),
            Err(e) => warn!("Failed to read catalog size after {}: {}", operation, e),
        }
    }
}

fn not_found(game_id: &str) -> anyhow::Error {
    GameHuntError::GameNotFound {
        game_id: game_id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::storage::MockCatalogStorage;
    use crate::ranking::{FixedClock, RankingWeights};
    use chrono::{TimeZone, Utc};

    fn fixed_ranker() -> FeaturedRanker {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        FeaturedRanker::with_clock(RankingWeights::default(), Arc::new(FixedClock::new(now)))
    }

    fn state_with(catalog: Arc<dyn CatalogStorage>) -> AppState {
        AppState::with_components(
            AppConfig::default(),
            catalog,
            fixed_ranker(),
            Arc::new(MetricsCollector::new().unwrap()),
        )
    }

    fn game(id: &str, upvotes: u64) -> CandidateGame {
        CandidateGame {
            upvote_count: upvotes,
            ..CandidateGame::new(id)
        }
    }

    #[tokio::test]
    async fn test_new_without_seed_file() {
        let state = AppState::new(AppConfig::default()).await.unwrap();
        assert!(!state.is_running().await);
        assert!(state.list_games().await.unwrap().is_empty());

        state.start().await;
        assert!(state.is_running().await);
        state.stop().await;
        assert!(!state.is_running().await);
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.ranking.weights.upvotes = 2.0;

        let result = AppState::new(config).await;
        assert!(matches!(result, Err(ServiceError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_new_with_missing_seed_file() {
        let mut config = AppConfig::default();
        config.catalog.seed_file = Some("/nonexistent/games.json".into());

        let result = AppState::new(config).await;
        assert!(matches!(result, Err(ServiceError::Catalog { .. })));
    }

    #[tokio::test]
    async fn test_featured_uses_catalog_snapshot() {
        let mut catalog = MockCatalogStorage::new();
        catalog
            .expect_list_games()
            .times(1)
            .returning(|| Ok(vec![game("low", 1), game("high", 50), game("mid", 20)]));

        let state = state_with(Arc::new(catalog));
        let featured = state.featured(Some(2)).await.unwrap();

        let ids: Vec<_> = featured.iter().map(|s| s.game.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid"]);
        assert_eq!(
            state
                .metrics()
                .ranking()
                .requests_total
                .with_label_values(&["success"])
                .get(),
            1
        );
    }

    #[tokio::test]
    async fn test_featured_non_positive_limit() {
        let mut catalog = MockCatalogStorage::new();
        catalog
            .expect_list_games()
            .returning(|| Ok(vec![game("a", 1)]));

        let state = state_with(Arc::new(catalog));
        assert!(state.featured(Some(0)).await.unwrap().is_empty());
        assert!(state.featured(Some(-1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_featured_storage_failure() {
        let mut catalog = MockCatalogStorage::new();
        catalog.expect_list_games().returning(|| {
            Err(GameHuntError::InternalError {
                message: "backing store offline".to_string(),
            }
            .into())
        });

        let state = state_with(Arc::new(catalog));
        assert!(state.featured(None).await.is_err());
        assert_eq!(
            state
                .metrics()
                .ranking()
                .requests_total
                .with_label_values(&["error"])
                .get(),
            1
        );
    }

    #[tokio::test]
    async fn test_catalog_operations() {
        let state = state_with(Arc::new(InMemoryCatalogStorage::default()));

        assert!(state.upsert_game(game("a", 3)).await.unwrap());
        assert!(!state.upsert_game(game("a", 4)).await.unwrap());
        assert_eq!(state.get_game("a").await.unwrap().upvote_count, 4);

        let updated = state
            .update_editorial(
                "a",
                EditorialUpdate {
                    editorial_boost: None,
                    editorial_override: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(updated.editorial_override);

        state.remove_game("a").await.unwrap();
        assert!(state.get_game("a").await.is_err());
        assert!(state.remove_game("a").await.is_err());
        assert_eq!(state.metrics().catalog().games.get(), 0);
    }
}
