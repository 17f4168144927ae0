use serde::{Deserialize, Serialize};

/// Position in the ranking, 1-based
pub type Position = usize;

/// One line of a ranking. The serialized field names are the public wire
/// format, shared by the API and the stored history payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "posicao")]
    pub position: Position,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: i64,
    #[serde(rename = "pontuacao")]
    pub score: f64,
}
