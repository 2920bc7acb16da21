use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{GameDisplayRecord, HotList};
use crate::state::AppState;

/// Game shown by the detail view when the client has no selection yet.
const FEATURED_GAME_ID: &str = "284818";

const DEFAULT_HOT_LIMIT: usize = 10;
const MAX_HOT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct HotQuery {
    limit: Option<usize>,
}

/// Handler for the home banner's hot-games strip.
pub async fn hot(
    State(state): State<AppState>,
    Query(params): Query<HotQuery>,
) -> AppResult<Json<HotList>> {
    let limit = params.limit.unwrap_or(DEFAULT_HOT_LIMIT).min(MAX_HOT_LIMIT);
    let games = state.catalog.hot_games(limit).await?;

    Ok(Json(HotList {
        games,
        fetched_at: Utc::now(),
    }))
}

/// Handler for one game's flattened detail record.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GameDisplayRecord>> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput(format!("invalid game id: {id:?}")));
    }

    let record = state.catalog.game_details(&id).await?;
    Ok(Json(record))
}

/// Handler for the detail view's default game.
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<GameDisplayRecord>> {
    let record = state.catalog.game_details(FEATURED_GAME_ID).await?;
    Ok(Json(record))
}
