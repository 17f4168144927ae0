use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::HistoryParams;
use crate::api::{ApiError, ApiResult};
use crate::ranking::RankingEntry;
use crate::services::HistoryArchive;

pub async fn get_history_dates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let archive = HistoryArchive::new(state.pool.clone());
    Ok(Json(archive.list_timestamps()?))
}

pub async fn get_history_ranking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<RankingEntry>>> {
    let timestamp = params
        .data
        .filter(|data| !data.is_empty())
        .ok_or_else(|| ApiError::bad_request("Parameter 'data' is required."))?;

    let archive = HistoryArchive::new(state.pool.clone());
    archive
        .get_snapshot(&timestamp)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Ranking not found."))
}
