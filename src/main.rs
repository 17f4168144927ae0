use anyhow::Result;

use player_ranking::cli::Command;
use player_ranking::{
    handle_completions, handle_history, handle_ingest, handle_ranking, handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Ingest { file } => handle_ingest(file),
        Command::Ranking => handle_ranking(),
        Command::History { at } => handle_history(at.as_deref()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
