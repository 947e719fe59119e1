//! Domain types handed to the UI layer.

use serde::{Deserialize, Serialize};

/// Where a record came from, so callers (and tests) can tell live data
/// from the literal fallback datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Live,
    Fallback,
}

/// One player's single-season value for one statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRecord {
    pub player_name: String,
    pub player_id: Option<i64>,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub league: Option<String>,
    pub value: f64,
    pub stat_key: String,
    pub season: i32,
    /// Position in the list this record was taken from. Live leader lists
    /// are 1-based; in the all-time fallback datasets rank 0 marks the
    /// record holder.
    pub rank: u32,
    /// Era/status label assigned by the classifier
    pub status: String,
    pub source: DataSource,
}

/// One player's accumulated standing across seasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub player_name: String,
    /// First id seen for this player across the merged seasons; seasons
    /// lacking an id never overwrite one already found.
    pub player_id: Option<i64>,
    pub total: f64,
    pub appearances: u32,
    /// Seasons the player appeared in, sorted ascending
    pub seasons: Vec<i32>,
}

/// One point of a player's year-by-year trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonStat {
    pub season: i32,
    pub value: f64,
}
