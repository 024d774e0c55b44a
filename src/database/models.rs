use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

use super::{GameId, StoreError};
use crate::score::Difficulty;

pub const MAX_PLAYER_NAME_LEN: usize = 50;
/// Anything longer than a day is assumed to be a bogus submission.
pub const MAX_TIME_SECONDS: i64 = 24 * 60 * 60;

/// A game result as submitted by a client. The score is never part of
/// the submission; the store derives it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SubmitGame {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub time_seconds: i64,
    pub won: bool,
}

impl SubmitGame {
    /// Checks the submission against the data model limits and returns
    /// the trimmed player name. Runs before any write so a bad
    /// submission never reaches the database.
    pub fn validate(&self) -> Result<String, StoreError> {
        let name = self.player_name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "player name cannot be empty".to_owned(),
            ));
        }
        if name.chars().count() > MAX_PLAYER_NAME_LEN {
            return Err(StoreError::Validation(format!(
                "player name cannot exceed {} characters",
                MAX_PLAYER_NAME_LEN
            )));
        }
        if self.time_seconds <= 0 {
            return Err(StoreError::Validation(
                "time must be a positive number of seconds".to_owned(),
            ));
        }
        if self.time_seconds > MAX_TIME_SECONDS {
            return Err(StoreError::Validation(
                "time cannot exceed 24 hours".to_owned(),
            ));
        }
        Ok(name.to_owned())
    }
}

/// A stored game result.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, sqlx::FromRow)]
#[serde(crate = "rocket::serde")]
pub struct GameRecord {
    pub id: GameId,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub time_seconds: i64,
    pub won: bool,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

/// One row of the ranked leaderboard, rank starting at 1.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub time_seconds: i64,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub total_count: i64,
    pub difficulty: Option<Difficulty>,
    pub limit: i64,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ClearResponse {
    pub cleared_entries: u64,
}

/// Per-difficulty aggregates for one player. `best_time` is only
/// present when the player has at least one win at that difficulty.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct DifficultyStats {
    pub games_played: i64,
    pub games_won: i64,
    pub win_rate: f64,
    pub best_time: Option<i64>,
    pub best_score: i64,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct PlayerStatsResponse {
    pub player_name: String,
    pub total_games: i64,
    pub total_wins: i64,
    pub overall_win_rate: f64,
    pub difficulties: BTreeMap<Difficulty, DifficultyStats>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
