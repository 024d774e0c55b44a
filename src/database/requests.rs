use chrono::Utc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::*;

use super::*;
use crate::score::Difficulty;

#[get("/")]
pub fn index() -> &'static str {
    "This is a Minesweeper leaderboard server!"
}

/// Reports whether the service and its database are usable.
/// Unreachable storage turns into a 503, never a propagated error.
#[get("/health", format = "json")]
pub async fn health(database: &State<Database>) -> (Status, Json<HealthResponse>) {
    let healthy = database.health_check().await;
    let (code, status) = if healthy {
        (Status::Ok, "healthy")
    } else {
        (Status::ServiceUnavailable, "unhealthy - database connection failed")
    };
    (
        code,
        Json(HealthResponse {
            status: status.to_owned(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }),
    )
}

/// Accepts a finished game and stores it with its derived score.
/// Malformed submissions fail with a validation error before any write.
#[post("/games", format = "json", data = "<submission>")]
pub async fn submit_game(
    submission: Json<SubmitGame>,
    database: &State<Database>,
) -> RequestResult<(Status, Json<GameRecord>)> {
    let record = database.insert_game(&submission.0).await?;
    Ok((Status::Created, Json(record)))
}

/// Fetches ranked standings: winning games only, ordered by score
/// descending with faster times breaking ties.
#[get("/leaderboard?<difficulty>&<limit>")]
pub async fn get_leaderboard(
    difficulty: Option<&str>,
    limit: Option<i64>,
    database: &State<Database>,
) -> RequestResult<Json<LeaderboardResponse>> {
    // An unrecognized filter is the caller's mistake, not an empty filter.
    let difficulty = match difficulty {
        Some(value) => Some(value.parse::<Difficulty>().map_err(|()| {
            StoreError::Validation(format!("unknown difficulty: {}", value))
        })?),
        None => None,
    };
    let limit = database.clamp_limit(limit);
    let records = database.leaderboard(difficulty, Some(limit)).await?;
    let total_count = database.leaderboard_count(difficulty).await?;

    let entries = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| LeaderboardEntry {
            rank: index + 1,
            player_name: record.player_name,
            difficulty: record.difficulty,
            time_seconds: record.time_seconds,
            score: record.score,
            created_at: record.created_at,
        })
        .collect();

    Ok(Json(LeaderboardResponse {
        entries,
        total_count,
        difficulty,
        limit,
    }))
}

/// Deletes every stored game and reports how many rows were removed.
#[delete("/leaderboard")]
pub async fn clear_leaderboard(
    database: &State<Database>,
) -> RequestResult<Json<ClearResponse>> {
    let cleared_entries = database.clear().await?;
    Ok(Json(ClearResponse { cleared_entries }))
}

/// Per-player aggregates, grouped by difficulty, with overall totals.
/// A player with no recorded games gets empty stats, not a 404.
#[get("/players/<player_name>/stats", format = "json")]
pub async fn get_player_stats(
    player_name: &str,
    database: &State<Database>,
) -> RequestResult<Json<PlayerStatsResponse>> {
    let player_name = player_name.trim();
    if player_name.is_empty() {
        return Err(StoreError::Validation(
            "player name cannot be empty".to_owned(),
        ));
    }

    let difficulties = database.player_stats(player_name).await?;

    let total_games: i64 = difficulties.values().map(|stats| stats.games_played).sum();
    let total_wins: i64 = difficulties.values().map(|stats| stats.games_won).sum();
    let overall_win_rate = if total_games > 0 {
        total_wins as f64 / total_games as f64
    } else {
        0.0
    };

    Ok(Json(PlayerStatsResponse {
        player_name: player_name.to_owned(),
        total_games,
        total_wins,
        overall_win_rate,
        difficulties,
    }))
}
