use log::info;
use std::path::{Path, PathBuf};

use crate::config::IngestionSettings;
use crate::database::{self, DbPool};
use crate::errors::{IngestError, IngestResult};
use crate::ingestion::{CsvRowReader, ParsedRow, RejectedRow, RejectionLog};
use crate::services::history::{HistoryArchive, HistorySnapshot};

#[derive(Debug, Clone, Default)]
pub struct IngestionReport {
    /// Rows applied to the player store
    pub accepted: usize,
    pub rejected: Vec<RejectedRow>,
    /// `None` only when the input was empty
    pub snapshot: Option<HistorySnapshot>,
}

/// Applies CSV score uploads to the player store and archives the
/// resulting ranking.
pub struct IngestionService {
    pool: DbPool,
    archive: HistoryArchive,
    rejected_rows_log: PathBuf,
}

impl IngestionService {
    pub fn new(pool: DbPool, settings: &IngestionSettings) -> Self {
        Self {
            archive: HistoryArchive::new(pool.clone()),
            pool,
            rejected_rows_log: settings.rejected_rows_log.clone(),
        }
    }

    pub fn ingest_file(&self, path: &Path) -> IngestResult<IngestionReport> {
        info!("Ingesting CSV file {}", path.display());
        let contents = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
        self.ingest_bytes(&contents)
    }

    /// Takes the whole upload at once: blank lines and the exact text of
    /// rejected rows are recovered from the raw bytes.
    pub fn ingest_bytes(&self, input: &[u8]) -> IngestResult<IngestionReport> {
        let mut rejection_log = RejectionLog::create(&self.rejected_rows_log)?;

        let Some(rows) = CsvRowReader::open(input)? else {
            info!("CSV input is empty, nothing to ingest");
            rejection_log.finish()?;
            return Ok(IngestionReport::default());
        };

        let mut report = IngestionReport::default();
        self.apply_rows(rows, &mut rejection_log, &mut report)?;
        rejection_log.finish()?;

        info!(
            "  → Applied {} rows, rejected {}",
            report.accepted,
            report.rejected.len()
        );

        report.snapshot = Some(self.archive.append_snapshot()?);
        Ok(report)
    }

    fn apply_rows(
        &self,
        rows: CsvRowReader<'_>,
        rejection_log: &mut RejectionLog,
        report: &mut IngestionReport,
    ) -> IngestResult<()> {
        let mut conn = database::get_connection(&self.pool)?;

        for parsed in rows {
            match parsed? {
                ParsedRow::Valid(player) => {
                    database::players::upsert_player(
                        &mut conn,
                        &player.name,
                        player.level,
                        player.score,
                    )?;
                    report.accepted += 1;
                }
                ParsedRow::Rejected(rejected) => {
                    rejection_log.record(&rejected)?;
                    report.rejected.push(rejected);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{get_connection, players, test_pool};
    use crate::ranking::current_ranking;
    use tempfile::TempDir;

    const EXAMPLE_CSV: &str = "nome,nivel,pontuacao\nAna,5,120.5\nBeto,abc,90\nCarla,3,150.0";

    fn service(dir: &TempDir, pool: &DbPool) -> IngestionService {
        let settings = IngestionSettings {
            seed_csv_path: dir.path().join("players.csv"),
            rejected_rows_log: dir.path().join("errors.log"),
        };
        IngestionService::new(pool.clone(), &settings)
    }

    fn log_lines(dir: &TempDir) -> Vec<String> {
        std::fs::read_to_string(dir.path().join("errors.log"))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_example_upload() {
        let (dir, pool) = test_pool();
        let report = service(&dir, &pool).ingest_bytes(EXAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(players::count(&mut get_connection(&pool).unwrap()).unwrap(), 2);

        let lines = log_lines(&dir);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Row 2:"));
        assert!(lines[0].ends_with("Beto,abc,90"));

        let ranking = current_ranking(&pool).unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!((ranking[0].position, ranking[0].name.as_str()), (1, "Carla"));
        assert_eq!(ranking[0].score, 150.0);
        assert_eq!((ranking[1].position, ranking[1].name.as_str()), (2, "Ana"));
        assert_eq!(ranking[1].score, 120.5);

        assert_eq!(report.snapshot.unwrap().entries, ranking);
    }

    #[test]
    fn test_reupload_updates_existing_player() {
        let (dir, pool) = test_pool();
        let service = service(&dir, &pool);

        service.ingest_bytes(EXAMPLE_CSV.as_bytes()).unwrap();
        service
            .ingest_bytes("nome,nivel,pontuacao\nAna,6,200.0\n".as_bytes())
            .unwrap();

        let mut conn = get_connection(&pool).unwrap();
        assert_eq!(players::count(&mut conn).unwrap(), 2);
        let ana = players::find_by_name(&mut conn, "Ana").unwrap().unwrap();
        assert_eq!((ana.level, ana.score), (6, 200.0));

        // Each ingestion truncates the log
        assert!(log_lines(&dir).is_empty());
    }

    #[test]
    fn test_each_ingestion_adds_one_snapshot() {
        let (dir, pool) = test_pool();
        let service = service(&dir, &pool);
        let archive = HistoryArchive::new(pool.clone());

        service.ingest_bytes(EXAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(archive.list_timestamps().unwrap().len(), 1);

        // No valid rows still records a snapshot
        let report = service
            .ingest_bytes("nome,nivel,pontuacao\nbad\n".as_bytes())
            .unwrap();
        assert_eq!(report.accepted, 0);
        assert!(report.snapshot.is_some());
        assert_eq!(archive.list_timestamps().unwrap().len(), 2);

        let latest = archive.list_timestamps().unwrap().remove(0);
        assert_eq!(
            archive.get_snapshot(&latest).unwrap().unwrap(),
            current_ranking(&pool).unwrap()
        );
    }

    #[test]
    fn test_empty_input_is_noop_but_creates_log() {
        let (dir, pool) = test_pool();
        std::fs::write(dir.path().join("errors.log"), "old\n").unwrap();

        let report = service(&dir, &pool).ingest_bytes(b"").unwrap();

        assert_eq!(report.accepted, 0);
        assert!(report.snapshot.is_none());
        assert!(HistoryArchive::new(pool).list_timestamps().unwrap().is_empty());
        assert!(log_lines(&dir).is_empty());
    }

    #[test]
    fn test_ingest_missing_file_is_io_error() {
        let (dir, pool) = test_pool();
        let result = service(&dir, &pool).ingest_file(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(IngestError::Io { .. })));
    }

    #[test]
    fn test_rows_before_decode_error_stay_applied() {
        let (dir, pool) = test_pool();
        let input: &[u8] = b"nome,nivel,pontuacao\nAna,5,1\n\xff,1,2\n";

        let result = service(&dir, &pool).ingest_bytes(input);

        assert!(matches!(result, Err(IngestError::Decode { row: 2 })));
        assert_eq!(players::count(&mut get_connection(&pool).unwrap()).unwrap(), 1);
        assert!(HistoryArchive::new(pool).list_timestamps().unwrap().is_empty());
    }

    #[test]
    fn test_nan_score_is_rejected_and_later_rows_applied() {
        let (dir, pool) = test_pool();
        let input = "nome,nivel,pontuacao\nAna,1,nan\nBeto,2,5\n";

        let report = service(&dir, &pool).ingest_bytes(input.as_bytes()).unwrap();

        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].row, 1);
        assert!(report.snapshot.is_some());

        let mut conn = get_connection(&pool).unwrap();
        assert!(players::find_by_name(&mut conn, "Ana").unwrap().is_none());
        assert_eq!(players::find_by_name(&mut conn, "Beto").unwrap().unwrap().score, 5.0);
        assert_eq!(log_lines(&dir), vec!["Row 1: score is not a finite number -> Ana,1,nan"]);
    }

    #[test]
    fn test_infinite_score_never_reaches_history() {
        let (dir, pool) = test_pool();
        let input = "nome,nivel,pontuacao\nAna,1,inf\nBeto,2,-inf\nCarla,3,7.5\n";

        let report = service(&dir, &pool).ingest_bytes(input.as_bytes()).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected.len(), 2);

        let archive = HistoryArchive::new(pool.clone());
        let latest = archive.list_timestamps().unwrap().remove(0);
        let snapshot = archive.get_snapshot(&latest).unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Carla");
    }

    #[test]
    fn test_blank_lines_are_logged_as_rows() {
        let (dir, pool) = test_pool();
        let input = "nome,nivel,pontuacao\nAna,1,5\n\nBeto,x,1\n";

        let report = service(&dir, &pool).ingest_bytes(input.as_bytes()).unwrap();

        assert_eq!(report.accepted, 1);
        assert_eq!(
            report.rejected.iter().map(|r| r.row).collect::<Vec<_>>(),
            vec![2, 3]
        );
        let lines = log_lines(&dir);
        assert_eq!(
            lines,
            vec![
                "Row 2: expected 3 columns, found 0 -> ",
                "Row 3: level is not an integer -> Beto,x,1",
            ]
        );
    }
}
