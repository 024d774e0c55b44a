use rocket::serde::{Deserialize, Serialize};

/// Closed set of game difficulties. Stored as lowercase text in the
/// database and accepted in the same form as a query parameter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, sqlx::Type,
)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

/// Scoring weights for a single difficulty tier.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyWeights {
    pub base: i64,
    pub multiplier: i64,
}

/// Score table: per-difficulty base and multiplier, plus a global floor
/// and a per-second time penalty. Harder tiers must never score below
/// easier ones for the same time.
#[derive(Clone, Copy, Debug)]
pub struct ScoreTable {
    pub floor: i64,
    pub time_penalty: i64,
    pub easy: DifficultyWeights,
    pub medium: DifficultyWeights,
    pub hard: DifficultyWeights,
}

impl ScoreTable {
    pub fn weights(&self, difficulty: Difficulty) -> DifficultyWeights {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            floor: 100,
            time_penalty: 1,
            easy: DifficultyWeights { base: 1000, multiplier: 1 },
            medium: DifficultyWeights { base: 1500, multiplier: 2 },
            hard: DifficultyWeights { base: 2000, multiplier: 3 },
        }
    }
}

/// Computes the score for a finished game.
///
/// Losses always score 0. Wins score
/// `max(floor, base - time_seconds * time_penalty) * multiplier`,
/// so a win is worth at least `floor * multiplier` no matter how slow.
/// Pure and deterministic; the caller is responsible for validating
/// `time_seconds` before calling.
pub fn compute_score(
    table: &ScoreTable,
    difficulty: Difficulty,
    time_seconds: i64,
    won: bool,
) -> i64 {
    if !won {
        return 0;
    }
    let weights = table.weights(difficulty);
    let raw = weights.base - time_seconds * table.time_penalty;
    raw.max(table.floor) * weights.multiplier
}
