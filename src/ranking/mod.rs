pub mod types;

pub use types::{Position, RankingEntry};

use anyhow::Result;

use crate::database::{self, DbPool, Player};

/// Current ranking, best score first. Reads only.
pub fn current_ranking(pool: &DbPool) -> Result<Vec<RankingEntry>> {
    let mut conn = database::get_connection(pool)?;
    let players = database::players::list_all_sorted_by_score_desc(&mut conn)?;
    Ok(assign_positions(players))
}

/// Numbers players 1..=n in the order given.
pub fn assign_positions(players: Vec<Player>) -> Vec<RankingEntry> {
    players
        .into_iter()
        .enumerate()
        .map(|(idx, player)| RankingEntry {
            position: idx + 1,
            name: player.name,
            level: player.level,
            score: player.score,
        })
        .collect()
}
