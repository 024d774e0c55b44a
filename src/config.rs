use crate::score::ScoreTable;

/// Application settings, loaded from the environment with sensible
/// defaults. `.env` files are honoured via dotenv, matching how the
/// server is deployed.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    /// Entries returned by a leaderboard query when no limit is given.
    pub default_limit: i64,
    /// Hard cap on the number of entries a single query may return.
    pub max_limit: i64,
    pub scoring: ScoreTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:leaderboard.db".to_owned(),
            default_limit: 100,
            max_limit: 1000,
            scoring: ScoreTable::default(),
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// Recognised variables: `DATABASE_URL`, `MAX_LEADERBOARD_ENTRIES`.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = dotenv::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(limit) = dotenv::var("MAX_LEADERBOARD_ENTRIES") {
            match limit.parse() {
                Ok(limit) => config.default_limit = limit,
                Err(_) => log::warn!(
                    "ignoring unparsable MAX_LEADERBOARD_ENTRIES value: {}",
                    limit
                ),
            }
        }
        config
    }
}
