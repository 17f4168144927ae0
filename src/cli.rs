use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "player-ranking backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Load the seed CSV if needed and start the HTTP API
    Serve {
        /// Port number (defaults to SERVER_PORT or 5000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply a CSV file of player scores and record a ranking snapshot
    Ingest {
        /// CSV file with a header line and `name,level,score` rows
        file: PathBuf,
    },
    /// Print the current ranking
    Ranking,
    /// List snapshot timestamps, or print the snapshot taken at one
    History {
        /// Timestamp as listed, e.g. "2024-03-15 10:00:00"
        #[arg(long)]
        at: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
