use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::AppConfig;

pub mod history;
pub mod ranking;
pub mod upload;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}
