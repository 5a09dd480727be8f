//! Game catalog and featured ranking endpoints

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::error::GameHuntError;
use crate::service::AppState;
use crate::types::{CandidateGame, EditorialUpdate, ScoredGame};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Query parameters of the featured endpoint
#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    /// Requested list size; non-positive values give an empty list
    pub limit: Option<i64>,
}

/// GET /api/games/featured
pub async fn featured_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<FeaturedQuery>,
) -> Result<Json<Vec<ScoredGame>>, ApiError> {
    debug!("Featured games requested, limit: {:?}", query.limit);
    let ranked = state.featured(query.limit).await?;
    Ok(Json(ranked))
}

/// GET /api/games
pub async fn list_games_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CandidateGame>>, ApiError> {
    Ok(Json(state.list_games().await?))
}

/// GET /api/games/{id}
pub async fn get_game_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<CandidateGame>, ApiError> {
    Ok(Json(state.get_game(&game_id).await?))
}

/// PUT /api/games/{id}
pub async fn put_game_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    ApiJson(mut game): ApiJson<CandidateGame>,
) -> Result<(StatusCode, Json<CandidateGame>), ApiError> {
    if game.id.is_empty() {
        game.id = game_id.clone();
    } else if game.id != game_id {
        return Err(GameHuntError::InvalidGame {
            reason: format!("body id '{}' does not match path id '{}'", game.id, game_id),
        }
        .into());
    }

    let inserted = state.upsert_game(game.clone()).await?;
    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(game)))
}

/// PATCH /api/games/{id}/editorial
pub async fn editorial_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    ApiJson(update): ApiJson<EditorialUpdate>,
) -> Result<Json<CandidateGame>, ApiError> {
    Ok(Json(state.update_editorial(&game_id, update).await?))
}

/// DELETE /api/games/{id}
pub async fn delete_game_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.remove_game(&game_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
