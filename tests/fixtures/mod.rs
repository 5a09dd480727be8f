//! Test fixtures and helpers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use game_hunt::catalog::{CatalogStorage, InMemoryCatalogStorage};
use game_hunt::config::AppConfig;
use game_hunt::error::{GameHuntError, Result};
use game_hunt::metrics::MetricsCollector;
use game_hunt::ranking::{FeaturedRanker, FixedClock, RankingWeights};
use game_hunt::service::AppState;
use game_hunt::types::{CandidateGame, EditorialUpdate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Instant all fixture rankings are evaluated at
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Builder for candidate games
pub struct GameBuilder {
    game: CandidateGame,
}

impl GameBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            game: CandidateGame::new(id),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.game.name = name.to_string();
        self
    }

    pub fn upvotes(mut self, upvotes: u64) -> Self {
        self.game.upvote_count = upvotes;
        self
    }

    pub fn comments(mut self, comments: u64) -> Self {
        self.game.comment_count = comments;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.game.rating = Some(rating);
        self
    }

    pub fn released_days_ago(mut self, days: i64) -> Self {
        self.game.release_timestamp = Some(fixture_now() - Duration::days(days));
        self
    }

    pub fn boosted(mut self) -> Self {
        self.game.editorial_boost = true;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.game.editorial_override = true;
        self
    }

    pub fn build(self) -> CandidateGame {
        self.game
    }
}

/// A small catalog resembling a real discovery feed
pub fn sample_catalog() -> Vec<CandidateGame> {
    vec![
        GameBuilder::new("pocket-city")
            .name("Pocket City 2")
            .upvotes(240)
            .comments(31)
            .rating(4.6)
            .released_days_ago(12)
            .build(),
        GameBuilder::new("alto")
            .name("Alto's Odyssey")
            .upvotes(510)
            .comments(88)
            .rating(4.8)
            .released_days_ago(400)
            .build(),
        GameBuilder::new("tiny-rogues")
            .name("Tiny Rogues")
            .upvotes(35)
            .comments(4)
            .released_days_ago(2)
            .boosted()
            .build(),
        GameBuilder::new("slay-the-spire")
            .name("Slay the Spire")
            .upvotes(90)
            .comments(15)
            .rating(4.9)
            .pinned()
            .build(),
        GameBuilder::new("untitled")
            .name("Untitled Prototype")
            .build(),
    ]
}

/// Ranker pinned to `fixture_now`
pub fn fixed_ranker() -> FeaturedRanker {
    FeaturedRanker::with_clock(
        RankingWeights::default(),
        Arc::new(FixedClock::new(fixture_now())),
    )
}

/// App state over an in-memory catalog and a fixed clock, already started
pub async fn started_state(games: Vec<CandidateGame>) -> Arc<AppState> {
    started_state_with_config(AppConfig::default(), games).await
}

pub async fn started_state_with_config(
    config: AppConfig,
    games: Vec<CandidateGame>,
) -> Arc<AppState> {
    let catalog = InMemoryCatalogStorage::with_games(config.catalog.max_games, games)
        .await
        .expect("fixture catalog should be valid");

    let state = AppState::with_components(
        config,
        Arc::new(catalog),
        fixed_ranker(),
        Arc::new(MetricsCollector::new().expect("Failed to create metrics collector")),
    );
    state.start().await;
    Arc::new(state)
}

/// Send a request through the router and decode the JSON body, if any
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Ids of a JSON array of games, in order
pub fn ids_of(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|game| game["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Catalog whose backing store is unreachable
#[derive(Debug, Default)]
pub struct UnavailableCatalog {
    pub calls: AtomicUsize,
}

impl UnavailableCatalog {
    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GameHuntError::InternalError {
            message: "catalog backend unavailable".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl CatalogStorage for UnavailableCatalog {
    async fn list_games(&self) -> Result<Vec<CandidateGame>> {
        self.fail()
    }

    async fn get_game(&self, _game_id: &str) -> Result<Option<CandidateGame>> {
        self.fail()
    }

    async fn upsert_game(&self, _game: CandidateGame) -> Result<bool> {
        self.fail()
    }

    async fn update_editorial(
        &self,
        _game_id: &str,
        _update: EditorialUpdate,
    ) -> Result<CandidateGame> {
        self.fail()
    }

    async fn remove_game(&self, _game_id: &str) -> Result<bool> {
        self.fail()
    }

    async fn game_count(&self) -> Result<usize> {
        self.fail()
    }
}
