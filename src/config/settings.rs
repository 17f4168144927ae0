use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ranking.db"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestionSettings {
    /// CSV loaded once at startup when the player store is empty
    pub seed_csv_path: PathBuf,
    /// Overwritten on every ingestion with one line per rejected row
    pub rejected_rows_log: PathBuf,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            seed_csv_path: PathBuf::from("players.csv"),
            rejected_rows_log: PathBuf::from("errors.log"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub ingestion: IngestionSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DATABASE_PATH`, `SEED_CSV_PATH`,
    /// `REJECTED_ROWS_LOG` and `SERVER_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(path) = lookup("DATABASE_PATH") {
            config.database.path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SEED_CSV_PATH") {
            config.ingestion.seed_csv_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("REJECTED_ROWS_LOG") {
            config.ingestion.rejected_rows_log = PathBuf::from(path);
        }
        match lookup("SERVER_PORT").map(|raw| raw.parse::<u16>()) {
            Some(Ok(port)) => config.server.port = port,
            Some(Err(e)) => log::warn!("Ignoring invalid SERVER_PORT: {}", e),
            None => {}
        }

        config
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}
