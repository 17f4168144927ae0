pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod ingestion;
pub mod ranking;
pub mod services;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use log::info;
use std::path::Path;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::ranking::RankingEntry;
use crate::services::server::ServerService;
use crate::services::{HistoryArchive, IngestionService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env().with_port(port);
        let service = ServerService::new(config);
        service.run().await
    })
}

pub fn handle_ingest(file: &Path) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::open(&config.database.path)?;
    let service = IngestionService::new(pool, &config.ingestion);

    let report = service.ingest_file(file)?;
    info!(
        "Ingested {}: {} applied, {} rejected (see {})",
        file.display(),
        report.accepted,
        report.rejected.len(),
        config.ingestion.rejected_rows_log.display()
    );
    if let Some(snapshot) = &report.snapshot {
        print_ranking(&snapshot.entries);
    }
    Ok(())
}

pub fn handle_ranking() -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::open(&config.database.path)?;
    print_ranking(&ranking::current_ranking(&pool)?);
    Ok(())
}

pub fn handle_history(at: Option<&str>) -> Result<()> {
    let config = AppConfig::from_env();
    let archive = HistoryArchive::new(database::open(&config.database.path)?);

    match at {
        Some(timestamp) => {
            let entries = archive
                .get_snapshot(timestamp)?
                .ok_or_else(|| anyhow!("No ranking snapshot at {}", timestamp))?;
            print_ranking(&entries);
        }
        None => {
            for timestamp in archive.list_timestamps()? {
                println!("{}", timestamp);
            }
        }
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn print_ranking(entries: &[RankingEntry]) {
    if entries.is_empty() {
        println!("{}", "Ranking is empty".dimmed());
        return;
    }

    println!(
        "{}",
        format!("{:>4}  {:<30} {:>6} {:>12}", "#", "Name", "Level", "Score").bold()
    );
    for entry in entries {
        let line = format!(
            "{:>4}  {:<30} {:>6} {:>12.2}",
            entry.position, entry.name, entry.level, entry.score
        );
        match entry.position {
            1 => println!("{}", line.yellow()),
            2 | 3 => println!("{}", line.cyan()),
            _ => println!("{}", line),
        }
    }
}
