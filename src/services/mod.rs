pub mod history;
pub mod ingestion;
pub mod seeding;
pub mod server;

pub use history::{HistoryArchive, HistorySnapshot};
pub use ingestion::{IngestionReport, IngestionService};
pub use seeding::{seed_if_empty, SeedOutcome};
