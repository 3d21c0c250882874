use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::{BoxScoreLine, PlayerLine, RankingMode, StandingRow};
use crate::shared::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    pub year: i32,
    pub mode: String,
}

/// HTTP handler for the season player ranking
///
/// GET /ranking?year=2025&mode=5x5
/// `mode` is `3x3`, `5x5` or `shooters`
#[instrument(name = "get_player_ranking", skip(state))]
pub async fn get_player_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Json<Vec<PlayerLine>>, AppError> {
    let mode: RankingMode = params
        .mode
        .parse()
        .map_err(|e: super::StatsError| AppError::BadRequest(e.to_string()))?;

    let lines = state
        .stats_service
        .get_player_ranking(params.year, mode)
        .await?;

    info!(row_count = lines.len(), "Ranking served");
    Ok(Json(lines))
}

/// GET /events/:event_id/games/:game_id/box-score
#[instrument(name = "get_game_box_score", skip(state))]
pub async fn get_game_box_score(
    State(state): State<AppState>,
    Path((event_id, game_id)): Path<(String, String)>,
) -> Result<Json<Vec<BoxScoreLine>>, AppError> {
    let rows = state
        .stats_service
        .get_game_box_score(&event_id, &game_id)
        .await?;
    Ok(Json(rows))
}

/// GET /events/:event_id/standings
#[instrument(name = "get_standings", skip(state))]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<StandingRow>>, AppError> {
    let rows = state.stats_service.get_standings(&event_id).await?;
    Ok(Json(rows))
}

/// GET /seasons
#[instrument(name = "list_seasons", skip(state))]
pub async fn list_seasons(State(state): State<AppState>) -> Result<Json<Vec<i32>>, AppError> {
    let seasons = state.stats_service.available_seasons().await?;
    Ok(Json(seasons))
}
