use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TABLE: &str = "games";

pub mod columns {
    pub const ID: &str = "id";
    pub const SEASON_ID: &str = "season_id";
    pub const WEEK: &str = "week";
    pub const PLAYED_AT: &str = "played_at";
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    pub id: Uuid,
    pub season_id: Uuid,
    pub week: i32,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    #[serde(default)]
    pub home_tds: Option<u32>,
    #[serde(default)]
    pub away_tds: Option<u32>,
    #[serde(default)]
    pub home_yards: Option<u32>,
    #[serde(default)]
    pub away_yards: Option<u32>,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl Model {
    #[inline]
    pub fn is_played(&self) -> bool {
        self.played_at.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct New {
    pub season_id: Uuid,
    pub week: i32,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

/// Written exactly once, when the game is simulated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultPatch {
    pub home_tds: u32,
    pub away_tds: u32,
    pub home_yards: u32,
    pub away_yards: u32,
    pub played_at: DateTime<Utc>,
}

/// Clears a result again, putting the game back in the unplayed state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Unplayed {
    pub home_tds: Option<u32>,
    pub away_tds: Option<u32>,
    pub home_yards: Option<u32>,
    pub away_yards: Option<u32>,
    pub played_at: Option<DateTime<Utc>>,
}

/// Only the columns needed to tell which weeks are already scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct WeekOnly {
    pub id: Uuid,
    pub week: i32,
}
