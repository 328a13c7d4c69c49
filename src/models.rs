use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;

/// Table holding one row per game.
pub const GAME_TABLE: &str = "game_details";
/// Table holding one row per (game, player).
pub const BOX_SCORE_TABLE: &str = "player_box_scores";

// ====== Reference data ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub team_id: i64,
    pub city: String,
    pub name: String,
    pub abbreviation: String,
}

impl Team {
    /// "City Name", e.g. "Boston Celtics"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Player {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ====== Stored rows ======

/// A row of `game_details`.
///
/// `embedding` is never selected by the read queries; it is populated only
/// by the offline backfill or by an in-memory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GameRecord {
    pub game_id: i64,
    pub season: i32,
    pub game_timestamp: DateTime<Utc>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_points: i32,
    pub away_points: i32,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl GameRecord {
    /// Ties are not expected in the data; a tie counts as an away win.
    pub fn winner_is_home(&self) -> bool {
        self.home_points > self.away_points
    }

    pub fn winner_id(&self) -> i64 {
        if self.winner_is_home() {
            self.home_team_id
        } else {
            self.away_team_id
        }
    }
}

/// A row of `player_box_scores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PlayerPerformance {
    pub game_id: i64,
    pub person_id: i64,
    pub team_id: i64,
    pub starter: bool,
    pub seconds: i32,
    pub points: i32,
    pub fg2_made: i32,
    pub fg2_attempted: i32,
    pub fg3_made: i32,
    pub fg3_attempted: i32,
    pub ft_made: i32,
    pub ft_attempted: i32,
    pub offensive_reb: i32,
    pub defensive_reb: i32,
    pub assists: i32,
    pub steals: i32,
    pub blocks: i32,
    pub turnovers: i32,
    pub defensive_fouls: i32,
    pub offensive_fouls: i32,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl PlayerPerformance {
    pub fn total_rebounds(&self) -> i32 {
        self.offensive_reb + self.defensive_reb
    }

    pub fn minutes_played(&self) -> f64 {
        f64::from(self.seconds) / 60.0
    }

    pub fn is_high_scoring(&self) -> bool {
        self.points >= 30
    }

    pub fn has_double_digit_assists(&self) -> bool {
        self.assists >= 10
    }

    pub fn has_double_digit_rebounds(&self) -> bool {
        self.total_rebounds() >= 10
    }

    /// Ten or more points, rebounds and assists in the same game.
    pub fn is_triple_double(&self) -> bool {
        self.points >= 10 && self.assists >= 10 && self.total_rebounds() >= 10
    }

    /// Human-readable labels for every notable threshold this line clears.
    pub fn notable_notes(&self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if self.is_high_scoring() {
            notes.push("high scoring game");
        }
        if self.has_double_digit_assists() {
            notes.push("double-digit assists");
        }
        if self.has_double_digit_rebounds() {
            notes.push("double-digit rebounds");
        }
        if self.is_triple_double() {
            notes.push("triple-double");
        }
        notes
    }
}

// ====== Retrieval projections ======

/// A game returned by a nearest-neighbor query.
/// `similarity` is `1 - cosine_distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GameHit {
    pub game_id: i64,
    pub game_timestamp: DateTime<Utc>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_points: i32,
    pub away_points: i32,
    pub similarity: f64,
}

/// A box score returned by a nearest-neighbor query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PerformanceHit {
    pub game_id: i64,
    pub person_id: i64,
    pub team_id: i64,
    pub points: i32,
    pub assists: i32,
    pub offensive_reb: i32,
    pub defensive_reb: i32,
    pub steals: i32,
    pub blocks: i32,
    pub starter: bool,
    pub seconds: i32,
    pub similarity: f64,
}

impl PerformanceHit {
    pub fn total_rebounds(&self) -> i32 {
        self.offensive_reb + self.defensive_reb
    }
}

/// Game row with team names joined in by the query itself.
/// Names are `None` when the team id has no reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GameSummary {
    pub game_id: i64,
    pub game_timestamp: Option<DateTime<Utc>>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_points: i32,
    pub away_points: i32,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub similarity: f64,
}

/// Box score with player name and game date joined in by the query itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PerformanceSummary {
    pub game_id: i64,
    pub person_id: i64,
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
    pub player_name: Option<String>,
    pub game_timestamp: Option<DateTime<Utc>>,
    pub similarity: f64,
}

/// Anything ranked by similarity to a query vector.
pub trait Scored {
    fn similarity(&self) -> f64;

    fn distance(&self) -> f64 {
        1.0 - self.similarity()
    }
}

macro_rules! impl_scored {
    ($($ty:ty),*) => {
        $(impl Scored for $ty {
            fn similarity(&self) -> f64 {
                self.similarity
            }
        })*
    };
}

impl_scored!(GameHit, PerformanceHit, GameSummary, PerformanceSummary);

// ====== Provenance and batch records ======

/// Provenance pointer to the row an answer was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub table: String,
    pub id: i64,
}

impl Evidence {
    pub fn game(game_id: i64) -> Self {
        Self {
            table: GAME_TABLE.to_string(),
            id: game_id,
        }
    }

    /// Box scores are keyed by their game id, matching the batch output format.
    ///
    /// Both the batch and online paths name the table `player_box_scores`.
    /// Older batch answer files used the singular `player_box_score`.
    pub fn box_score(game_id: i64) -> Self {
        Self {
            table: BOX_SCORE_TABLE.to_string(),
            id: game_id,
        }
    }
}

/// One entry of the batch questions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
}
