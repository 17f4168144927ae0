use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    history::{get_history_dates, get_history_ranking},
    ranking::get_ranking,
    upload::upload_csv,
    AppState,
};

const UPLOAD_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ranking", get(get_ranking))
        .route("/api/upload-csv", post(upload_csv))
        .route("/api/historico/datas", get(get_history_dates))
        .route("/api/historico/ranking", get(get_history_ranking))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
        .with_state(state)
}
