//! Concurrency tests for featured requests and catalog writes
//!
//! These tests run many requests against one shared state to make sure
//! rankings stay consistent while the catalog is being modified.

mod fixtures;

use axum::http::{Method, StatusCode};
use futures::future::join_all;
use game_hunt::api::create_router;
use game_hunt::types::EditorialUpdate;
use serde_json::json;
use std::time::{Duration, Instant};

use fixtures::{ids_of, sample_catalog, send, started_state, GameBuilder};

#[tokio::test]
async fn test_100_concurrent_featured_requests() {
    let app = create_router(started_state(sample_catalog()).await);
    let concurrent_requests = 100;

    let start_time = Instant::now();

    let responses = join_all((0..concurrent_requests).map(|_| {
        let app = app.clone();
        async move { send(&app, Method::GET, "/api/games/featured?limit=3", None).await }
    }))
    .await;

    let elapsed = start_time.elapsed();
    println!(
        "Served {} featured requests in {:?}",
        concurrent_requests, elapsed
    );

    for (status, body) in responses {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids_of(&body), vec!["slay-the-spire", "alto", "pocket-city"]);
    }
    assert!(elapsed < Duration::from_secs(10));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_during_writes() {
    let state = started_state(sample_catalog()).await;
    let app = create_router(state.clone());

    let writers = (0..50).map(|i| {
        let state = state.clone();
        tokio::spawn(async move {
            let game = GameBuilder::new(&format!("new-{}", i))
                .upvotes(i)
                .comments(i % 7)
                .released_days_ago(i as i64)
                .build();
            state.upsert_game(game).await
        })
    });

    let readers = (0..50).map(|_| {
        let app = app.clone();
        tokio::spawn(async move { send(&app, Method::GET, "/api/games/featured?limit=5", None).await })
    });

    for result in join_all(writers).await {
        assert!(result.unwrap().unwrap());
    }

    for result in join_all(readers).await {
        let (status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);

        // every snapshot still has the pinned game first
        let ids = ids_of(&body);
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], "slay-the-spire");
    }

    assert_eq!(state.list_games().await.unwrap().len(), 55);
    assert_eq!(state.metrics().catalog().games.get(), 55);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_editorial_updates() {
    let state = started_state(sample_catalog()).await;
    let app = create_router(state.clone());

    let updates = ["pocket-city", "alto", "tiny-rogues", "untitled"].map(|id| {
        let app = app.clone();
        tokio::spawn(async move {
            send(
                &app,
                Method::PATCH,
                &format!("/api/games/{}/editorial", id),
                Some(json!({"editorialOverride": true})),
            )
            .await
        })
    });

    for result in join_all(updates).await {
        let (status, _) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    // every game is pinned now, so the catalog order comes back unchanged
    let featured = state.featured(None).await.unwrap();
    let ids: Vec<_> = featured.iter().map(|s| s.game.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["pocket-city", "alto", "tiny-rogues", "slay-the-spire", "untitled"]
    );

    // unpinning is idempotent under contention too
    let clears = (0..10).map(|_| {
        let state = state.clone();
        tokio::spawn(async move {
            state
                .update_editorial(
                    "alto",
                    EditorialUpdate {
                        editorial_boost: None,
                        editorial_override: Some(false),
                    },
                )
                .await
        })
    });
    for result in join_all(clears).await {
        assert!(!result.unwrap().unwrap().editorial_override);
    }
}
