use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::AppState;
use crate::api::ApiResult;
use crate::ranking::{self, RankingEntry};

pub async fn get_ranking(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<RankingEntry>>> {
    let ranking = ranking::current_ranking(&state.pool)?;
    Ok(Json(ranking))
}
