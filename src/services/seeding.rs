use log::{info, warn};

use crate::config::IngestionSettings;
use crate::database::{self, DbPool};
use crate::errors::IngestResult;
use crate::services::ingestion::{IngestionReport, IngestionService};

#[derive(Debug)]
pub enum SeedOutcome {
    Seeded(IngestionReport),
    AlreadyPopulated,
    SeedFileMissing,
}

/// Loads the seed CSV when the player store is empty. A populated store is
/// never re-seeded, so running this on every startup is safe.
pub fn seed_if_empty(pool: &DbPool, settings: &IngestionSettings) -> IngestResult<SeedOutcome> {
    let player_count = {
        let mut conn = database::get_connection(pool)?;
        database::players::count(&mut conn)?
    };

    if player_count > 0 {
        info!("Player store already has {} players, skipping seed", player_count);
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let seed_path = &settings.seed_csv_path;
    if !seed_path.exists() {
        warn!("Seed file {} not found, starting with an empty ranking", seed_path.display());
        return Ok(SeedOutcome::SeedFileMissing);
    }

    let service = IngestionService::new(pool.clone(), settings);
    let report = service.ingest_file(seed_path)?;
    info!("Seeded player store with {} players", report.accepted);
    Ok(SeedOutcome::Seeded(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{get_connection, players, test_pool};

    fn settings(dir: &tempfile::TempDir) -> IngestionSettings {
        IngestionSettings {
            seed_csv_path: dir.path().join("players.csv"),
            rejected_rows_log: dir.path().join("errors.log"),
        }
    }

    #[test]
    fn test_seeds_empty_store_once() {
        let (dir, pool) = test_pool();
        let settings = settings(&dir);
        std::fs::write(&settings.seed_csv_path, "nome,nivel,pontuacao\nAna,5,120.5\n").unwrap();

        let first = seed_if_empty(&pool, &settings).unwrap();
        assert!(matches!(first, SeedOutcome::Seeded(ref r) if r.accepted == 1));

        std::fs::write(&settings.seed_csv_path, "nome,nivel,pontuacao\nZeca,1,999\n").unwrap();
        let second = seed_if_empty(&pool, &settings).unwrap();
        assert!(matches!(second, SeedOutcome::AlreadyPopulated));

        let mut conn = get_connection(&pool).unwrap();
        assert_eq!(players::count(&mut conn).unwrap(), 1);
        assert!(players::find_by_name(&mut conn, "Zeca").unwrap().is_none());
    }

    #[test]
    fn test_missing_seed_file() {
        let (dir, pool) = test_pool();
        let outcome = seed_if_empty(&pool, &settings(&dir)).unwrap();
        assert!(matches!(outcome, SeedOutcome::SeedFileMissing));
    }
}
