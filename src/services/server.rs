use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::create_router;
use crate::api::handlers::AppState;
use crate::config::AppConfig;
use crate::database;
use crate::services::seeding::{seed_if_empty, SeedOutcome};

pub struct ServerService {
    config: AppConfig,
}

impl ServerService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let pool = database::open(&self.config.database.path)?;
        info!("Using database {}", self.config.database.path.display());

        if let SeedOutcome::Seeded(report) = seed_if_empty(&pool, &self.config.ingestion)? {
            info!(
                "Initial load: {} players, {} rejected rows",
                report.accepted,
                report.rejected.len()
            );
        }

        let state = Arc::new(AppState {
            pool,
            config: self.config.clone(),
        });

        let app = create_router(state)
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
