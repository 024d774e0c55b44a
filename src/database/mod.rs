use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::AppConfig;
use crate::score::ScoreTable;

mod error;
mod models;
pub mod requests;
mod store;

pub use error::{RequestResult, StoreError};
pub use models::*;

pub type GameId = i64;

/// Handle to the leaderboard store. Constructed once at startup and
/// passed to request handlers through rocket's managed state; tests
/// construct their own over an in-memory database.
pub struct Database {
    pool: SqlitePool,
    scoring: ScoreTable,
    default_limit: i64,
    max_limit: i64,
}

impl Database {
    /// Connects to the database named by the config and ensures the
    /// schema exists.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true);

        // An in-memory database exists per connection, so the pool must
        // not open more than one.
        let max_connections = if config.database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let database = Self {
            pool,
            scoring: config.scoring,
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        };
        database.init_schema().await?;
        Ok(database)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_name TEXT NOT NULL,
                difficulty TEXT NOT NULL CHECK (difficulty IN ('easy', 'medium', 'hard')),
                time_seconds INTEGER NOT NULL CHECK (time_seconds > 0),
                won BOOLEAN NOT NULL,
                score INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // Ranked queries filter by difficulty and order by score;
        // recency queries order by creation time.
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_games_difficulty_score
             ON games (difficulty, score DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_games_created_at
             ON games (created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
