use std::collections::BTreeMap;

use chrono::Utc;

use super::{Database, DifficultyStats, GameRecord, StoreError, SubmitGame};
use crate::score::{compute_score, Difficulty};

#[derive(sqlx::FromRow)]
struct StatsRow {
    difficulty: Difficulty,
    games_played: i64,
    games_won: i64,
    best_time: Option<i64>,
    best_score: i64,
}

impl Database {
    /// Validates a submission, derives its score, and persists it.
    /// Returns the stored record, id and timestamp included.
    pub async fn insert_game(&self, submission: &SubmitGame) -> Result<GameRecord, StoreError> {
        let player_name = submission.validate()?;
        let score = compute_score(
            &self.scoring,
            submission.difficulty,
            submission.time_seconds,
            submission.won,
        );
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO games (player_name, difficulty, time_seconds, won, score, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&player_name)
        .bind(submission.difficulty)
        .bind(submission.time_seconds)
        .bind(submission.won)
        .bind(score)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        log::info!(
            "stored game {} for {} ({}, {}s, score {})",
            id,
            player_name,
            submission.difficulty,
            submission.time_seconds,
            score
        );

        Ok(GameRecord {
            id,
            player_name,
            difficulty: submission.difficulty,
            time_seconds: submission.time_seconds,
            won: submission.won,
            score,
            created_at,
        })
    }

    /// Fetches ranked entries: wins only, best score first, faster time
    /// breaking ties. The limit is clamped to the configured bounds.
    pub async fn leaderboard(
        &self,
        difficulty: Option<Difficulty>,
        limit: Option<i64>,
    ) -> Result<Vec<GameRecord>, StoreError> {
        let limit = self.clamp_limit(limit);

        let records = match difficulty {
            Some(difficulty) => {
                sqlx::query_as::<_, GameRecord>(
                    "SELECT id, player_name, difficulty, time_seconds, won, score, created_at
                     FROM games
                     WHERE won = 1 AND difficulty = ?
                     ORDER BY score DESC, time_seconds ASC
                     LIMIT ?",
                )
                .bind(difficulty)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, GameRecord>(
                    "SELECT id, player_name, difficulty, time_seconds, won, score, created_at
                     FROM games
                     WHERE won = 1
                     ORDER BY score DESC, time_seconds ASC
                     LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    /// Counts ranked (winning) entries matching the filter.
    pub async fn leaderboard_count(
        &self,
        difficulty: Option<Difficulty>,
    ) -> Result<i64, StoreError> {
        let count = match difficulty {
            Some(difficulty) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM games WHERE won = 1 AND difficulty = ?")
                    .bind(difficulty)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM games WHERE won = 1")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    /// Deletes every stored game, losses included, and returns how many
    /// rows were removed. Irreversible.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let response = sqlx::query("DELETE FROM games").execute(&self.pool).await?;
        let cleared = response.rows_affected();
        log::info!("cleared {} game records", cleared);
        Ok(cleared)
    }

    /// Aggregates one player's games by difficulty. A player with no
    /// records yields an empty map rather than an error.
    pub async fn player_stats(
        &self,
        player_name: &str,
    ) -> Result<BTreeMap<Difficulty, DifficultyStats>, StoreError> {
        let rows = sqlx::query_as::<_, StatsRow>(
            "SELECT difficulty,
                    COUNT(*) AS games_played,
                    SUM(CASE WHEN won THEN 1 ELSE 0 END) AS games_won,
                    MIN(CASE WHEN won THEN time_seconds END) AS best_time,
                    MAX(score) AS best_score
             FROM games
             WHERE player_name = ?
             GROUP BY difficulty",
        )
        .bind(player_name)
        .fetch_all(&self.pool)
        .await?;

        let stats = rows
            .into_iter()
            .map(|row| {
                let win_rate = if row.games_played > 0 {
                    row.games_won as f64 / row.games_played as f64
                } else {
                    0.0
                };
                (
                    row.difficulty,
                    DifficultyStats {
                        games_played: row.games_played,
                        games_won: row.games_won,
                        win_rate,
                        best_time: row.best_time,
                        best_score: row.best_score,
                    },
                )
            })
            .collect();

        Ok(stats)
    }

    /// Checks that the backing store answers a trivial query. Failures
    /// are reported as `false`, never propagated.
    pub async fn health_check(&self) -> bool {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(value) => value == 1,
            Err(error) => {
                log::warn!("database health check failed: {}", error);
                false
            }
        }
    }

    pub(crate) fn clamp_limit(&self, limit: Option<i64>) -> i64 {
        limit.unwrap_or(self.default_limit).clamp(1, self.max_limit)
    }
}
