#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub score: f64,
}

/// One row of `ranking_history`, payload still serialized
#[derive(Debug, Clone)]
pub struct DbSnapshot {
    pub id: i64,
    pub taken_at: String,
    pub payload: String,
}
