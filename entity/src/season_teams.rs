use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, SubAssign};
use uuid::Uuid;

pub const TABLE: &str = "season_teams";

pub mod columns {
    pub const SEASON_ID: &str = "season_id";
    pub const TEAM_ID: &str = "team_id";
}

/// Cumulative standings counters of one team in one season.
///
/// `ties` is left out of written rows while it is zero, so stores without
/// the column (see `migration/`) keep accepting games that were decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Counters {
    pub wins: u32,
    pub losses: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub ties: u32,
    pub tds_for: u32,
    pub tds_against: u32,
    pub yards_for: u32,
    pub yards_against: u32,
}

impl Counters {
    #[inline]
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    #[inline]
    pub fn td_diff(&self) -> i64 {
        i64::from(self.tds_for) - i64::from(self.tds_against)
    }

    #[inline]
    pub fn yard_diff(&self) -> i64 {
        i64::from(self.yards_for) - i64::from(self.yards_against)
    }
}

impl AddAssign for Counters {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
        self.ties += rhs.ties;
        self.tds_for += rhs.tds_for;
        self.tds_against += rhs.tds_against;
        self.yards_for += rhs.yards_for;
        self.yards_against += rhs.yards_against;
    }
}

impl SubAssign for Counters {
    fn sub_assign(&mut self, rhs: Self) {
        self.wins = self.wins.saturating_sub(rhs.wins);
        self.losses = self.losses.saturating_sub(rhs.losses);
        self.ties = self.ties.saturating_sub(rhs.ties);
        self.tds_for = self.tds_for.saturating_sub(rhs.tds_for);
        self.tds_against = self.tds_against.saturating_sub(rhs.tds_against);
        self.yards_for = self.yards_for.saturating_sub(rhs.yards_for);
        self.yards_against = self.yards_against.saturating_sub(rhs.yards_against);
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Also used as the insert shape when seeding a season.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    pub season_id: Uuid,
    pub team_id: Uuid,
    #[serde(flatten)]
    pub counters: Counters,
}

impl Model {
    pub fn zeroed(season_id: Uuid, team_id: Uuid) -> Self {
        Self {
            season_id,
            team_id,
            counters: Counters::default(),
        }
    }
}

/// The whole counter set is written back after a delta is added.
pub type Patch = Counters;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_without_ties_column_deserialize() {
        let row: Model = serde_json::from_value(json!({
            "season_id": Uuid::nil(),
            "team_id": Uuid::nil(),
            "wins": 2,
            "losses": 1,
            "tds_for": 9,
            "tds_against": 4,
            "yards_for": 900,
            "yards_against": 700,
        }))
        .unwrap();

        assert_eq!(row.counters.ties, 0);
        assert_eq!(row.counters.games(), 3);
        assert_eq!(row.counters.td_diff(), 5);
    }

    #[test]
    fn ties_are_only_written_once_there_are_any() {
        let decided = Counters {
            wins: 1,
            tds_for: 3,
            tds_against: 1,
            yards_for: 250,
            yards_against: 150,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(decided).unwrap(),
            json!({
                "wins": 1,
                "losses": 0,
                "tds_for": 3,
                "tds_against": 1,
                "yards_for": 250,
                "yards_against": 150,
            })
        );

        let seeded = serde_json::to_value(Model::zeroed(Uuid::nil(), Uuid::nil())).unwrap();
        assert!(seeded.get("ties").is_none());
        assert_eq!(seeded["wins"], json!(0));

        let level = Counters {
            ties: 1,
            ..decided
        };
        assert_eq!(serde_json::to_value(level).unwrap()["ties"], json!(1));
    }

    #[test]
    fn subtracting_never_underflows() {
        let mut counters = Counters {
            wins: 1,
            yards_for: 100,
            ..Default::default()
        };

        counters -= Counters {
            wins: 1,
            losses: 1,
            yards_for: 250,
            ..Default::default()
        };

        assert_eq!(counters, Counters::default());
    }
}
