use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const TABLE: &str = "seasons";

pub mod columns {
    pub const ID: &str = "id";
    pub const LEAGUE_ID: &str = "league_id";
    pub const SEASON_NO: &str = "season_no";
    pub const STATUS: &str = "status";
    pub const WEEK: &str = "week";
    pub const LAST_SIM_LOCAL_DATE: &str = "last_sim_local_date";
}

pub mod constants {
    pub const FIRST_WEEK: i32 = 1;
    pub const LAST_WEEK: i32 = 8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Regular,
    Playoffs,
    Complete,
}

impl Status {
    /// Statuses the simulator still advances.
    pub const ACTIVE: [Status; 2] = [Status::Regular, Status::Playoffs];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Playoffs => "playoffs",
            Self::Complete => "complete",
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    pub id: Uuid,
    pub league_id: Uuid,
    pub season_no: i32,
    pub status: Status,
    pub week: Option<i32>,
    pub last_sim_local_date: Option<NaiveDate>,
    #[serde(default)]
    pub sim_hour: Option<i32>,
    #[serde(default)]
    pub sim_min: Option<i32>,
    #[serde(default)]
    pub tz: Option<String>,
}

impl Model {
    /// The last week that was simulated, `0` before the first one.
    #[inline]
    pub fn week(&self) -> i32 {
        self.week.unwrap_or(0)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct New {
    pub league_id: Uuid,
    pub season_no: i32,
    pub status: Status,
    pub week: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Patch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sim_local_date: Option<NaiveDate>,
}
